use kneescore_core::models::answer::AnswerSet;
use kneescore_instruments::instruments::womac::{compute_womac_scores, Womac, WomacSection};
use kneescore_instruments::Instrument;

fn every_item(value: f64) -> AnswerSet {
    Womac.questions().iter().map(|q| (q.id.clone(), value)).collect()
}

#[test]
fn section_maxima_come_from_the_schema() {
    let scores = compute_womac_scores(&AnswerSet::new(), Womac.questions());
    assert_eq!(scores.max.pain, 20.0);
    assert_eq!(scores.max.stiffness, 8.0);
    assert_eq!(scores.max.function, 68.0);
    assert_eq!(scores.max.total, 96.0);
    assert_eq!(scores.max_answered, 24);
}

#[test]
fn all_zero_is_zero_percent() {
    let scores = compute_womac_scores(&every_item(0.0), Womac.questions());
    assert_eq!(scores.raw.total, 0.0);
    assert_eq!(scores.normalized.total, 0.0);
    assert_eq!(scores.answered, 24);
}

#[test]
fn all_four_is_one_hundred_percent() {
    let scores = compute_womac_scores(&every_item(4.0), Womac.questions());
    assert_eq!(scores.raw.total, 96.0);
    assert_eq!(scores.normalized.pain, 100.0);
    assert_eq!(scores.normalized.stiffness, 100.0);
    assert_eq!(scores.normalized.function, 100.0);
    assert_eq!(scores.normalized.total, 100.0);
}

#[test]
fn partial_completion_still_scores() {
    let answers: AnswerSet = Womac
        .questions()
        .iter()
        .filter(|q| q.section.as_deref() == Some(WomacSection::Function.id()))
        .map(|q| (q.id.clone(), 2.0))
        .collect();
    let scores = compute_womac_scores(&answers, Womac.questions());
    assert_eq!(scores.answered, 17);
    assert_eq!(scores.raw.function, 34.0);
    assert_eq!(scores.raw.pain, 0.0);
    assert_eq!(scores.normalized.function, 50.0);
    // 34 / 96 = 35.4%
    assert_eq!(scores.normalized.total, 35.0);
}

#[test]
fn non_numeric_answers_are_skipped() {
    let mut answers: AnswerSet = [("pain_1", 4.0), ("pain_2", 3.0)].into_iter().collect();
    answers.extend([("pain_3", "bastante")]);
    let scores = compute_womac_scores(&answers, Womac.questions());
    assert_eq!(scores.answered, 2);
    assert_eq!(scores.raw.pain, 7.0);
    assert_eq!(scores.normalized.pain, 35.0);
}

#[test]
fn question_ids_follow_section_numbering() {
    let womac = Womac;
    let ids: Vec<&str> = womac.questions().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids[0], "pain_1");
    assert_eq!(ids[5], "stiffness_1");
    assert_eq!(ids[23], "function_17");
}
