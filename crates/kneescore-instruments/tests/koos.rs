use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::question::Question;
use kneescore_instruments::instruments::koos::{compute_koos_scores, Koos, KoosSubscale};
use kneescore_instruments::Instrument;

fn items(subscale: KoosSubscale) -> Vec<Question> {
    Koos.questions()
        .iter()
        .filter(|q| q.section.as_deref() == Some(subscale.id()))
        .cloned()
        .collect()
}

fn answer_first(subscale: KoosSubscale, values: &[f64]) -> AnswerSet {
    items(subscale)
        .into_iter()
        .zip(values)
        .map(|(q, v)| (q.id, *v))
        .collect()
}

#[test]
fn subscale_item_counts() {
    let counts: Vec<usize> = KoosSubscale::ALL.iter().map(|s| items(*s).len()).collect();
    assert_eq!(counts, vec![7, 9, 17, 5, 4]);
    assert_eq!(Koos.questions().len(), 42);
}

#[test]
fn half_answered_all_zero_scores_100() {
    for subscale in KoosSubscale::ALL {
        let needed = items(subscale).len().div_ceil(2);
        let answers = answer_first(subscale, &vec![0.0; needed]);
        let scores = compute_koos_scores(&answers, Koos.questions());
        let sub = scores.get(subscale);
        assert!(sub.valid, "{subscale:?}");
        assert_eq!(sub.answered, needed);
        assert_eq!(sub.score, Some(100.0), "{subscale:?}");
    }
}

#[test]
fn fewer_than_half_is_invalid() {
    let answers = answer_first(KoosSubscale::Pain, &[0.0, 1.0, 2.0, 3.0]);
    let scores = compute_koos_scores(&answers, Koos.questions());
    assert!(!scores.pain.valid);
    assert_eq!(scores.pain.score, None);
    assert_eq!(scores.pain.answered, 4);
    assert_eq!(scores.pain.item_count, 9);
}

#[test]
fn all_fours_score_zero() {
    let answers = answer_first(KoosSubscale::Adl, &[4.0; 17]);
    let scores = compute_koos_scores(&answers, Koos.questions());
    assert_eq!(scores.adl.score, Some(0.0));
    assert_eq!(scores.adl.sum, 68.0);
}

#[test]
fn denominator_shrinks_to_answered_items() {
    // 2 of 4 QoL items: sum 3 over 8 possible.
    let answers = answer_first(KoosSubscale::Qol, &[1.0, 2.0]);
    let scores = compute_koos_scores(&answers, Koos.questions());
    assert_eq!(scores.qol.score, Some(62.5));
}

#[test]
fn score_is_rounded_to_one_decimal() {
    let answers = answer_first(KoosSubscale::Sport, &[1.0, 0.0, 0.0]);
    let scores = compute_koos_scores(&answers, Koos.questions());
    assert_eq!(scores.sport.score, Some(91.7));

    let answers = answer_first(KoosSubscale::Symptoms, &[1.0; 7]);
    let scores = compute_koos_scores(&answers, Koos.questions());
    assert_eq!(scores.symptoms.score, Some(75.0));
}

#[test]
fn subscales_are_independent() {
    let mut answers = answer_first(KoosSubscale::Symptoms, &[0.0; 7]);
    answers.extend(answer_first(KoosSubscale::Pain, &[4.0; 9]).iter().map(|(k, v)| (k.to_string(), v.clone())));
    let scores = compute_koos_scores(&answers, Koos.questions());
    assert_eq!(scores.symptoms.score, Some(100.0));
    assert_eq!(scores.pain.score, Some(0.0));
    for sub in [&scores.adl, &scores.sport, &scores.qol] {
        assert!(!sub.valid);
        assert_eq!(sub.score, None);
        assert_eq!(sub.sum, 0.0);
    }
}

#[test]
fn empty_answers_leave_every_subscale_incomplete() {
    let scores = compute_koos_scores(&AnswerSet::new(), Koos.questions());
    assert!(scores.subscales().all(|(_, sub)| !sub.valid && sub.score.is_none()));
}
