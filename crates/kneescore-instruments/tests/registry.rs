use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_instruments::error::InstrumentError;
use kneescore_instruments::scoring::ScoreResult;
use kneescore_instruments::{all_instruments, compute_score, get_instrument, prepare_submission};

#[test]
fn registry_lists_every_instrument_once() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["ikdc", "koos", "womac", "lysholm_tegner", "iks"]);
}

#[test]
fn question_ids_are_unique_within_each_instrument() {
    for instrument in all_instruments() {
        let mut ids: Vec<&str> = instrument.questions().iter().map(|q| q.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "duplicate question id in {}", instrument.name());
    }
}

#[test]
fn lookup_accepts_ids_and_backend_codes() {
    assert_eq!(get_instrument("womac").map(|i| i.kind()), Some(InstrumentKind::Womac));
    assert_eq!(
        get_instrument("LYSHOLM-TEGNER").map(|i| i.kind()),
        Some(InstrumentKind::LysholmTegner)
    );
    assert!(get_instrument("oxford").is_none());
}

#[test]
fn unknown_instrument_is_an_error() {
    let err = compute_score("oxford", &AnswerSet::new()).unwrap_err();
    assert!(matches!(err, InstrumentError::UnknownInstrument(ref id) if id == "oxford"));
}

#[test]
fn empty_answers_score_without_failing() {
    for instrument in all_instruments() {
        let result = compute_score(instrument.id(), &AnswerSet::new()).unwrap();
        assert_eq!(result.kind(), instrument.kind());
        assert_eq!(result.answered(), 0);
    }
}

#[test]
fn validity_gates() {
    let empty = AnswerSet::new();
    assert!(!compute_score("ikdc", &empty).unwrap().is_valid());
    assert!(!compute_score("koos", &empty).unwrap().is_valid());
    assert!(compute_score("womac", &empty).unwrap().is_valid());
    assert!(compute_score("lysholm_tegner", &empty).unwrap().is_valid());
    assert!(compute_score("iks", &empty).unwrap().is_valid());
}

#[test]
fn check_answers_flags_out_of_domain_values() {
    let womac = get_instrument("womac").unwrap();
    let answers: AnswerSet = [("pain_1", 7.0), ("pain_2", 2.0), ("not_a_question", 99.0)]
        .into_iter()
        .collect();
    let issues = womac.check_answers(&answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].question_id, "pain_1");
    assert_eq!(issues[0].value, 7.0);
    assert!(issues[0].to_string().contains("outside [0, 4]"));
}

#[test]
fn check_answers_respects_scale_ranges() {
    let ikdc = get_instrument("ikdc").unwrap();
    let answers: AnswerSet = [("q2_pain_frequency", 7.0), ("q3_pain_intensity", 11.0)]
        .into_iter()
        .collect();
    let issues = ikdc.check_answers(&answers);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].question_id, "q3_pain_intensity");
}

#[test]
fn submission_only_for_valid_results() {
    let ikdc = get_instrument("ikdc").unwrap();
    let partial: AnswerSet = [("q1_activity_without_pain", 4.0)].into_iter().collect();
    let result = ikdc.score(&partial);
    assert!(prepare_submission("user-1", &partial, &result).is_none());

    let complete: AnswerSet = ikdc
        .questions()
        .iter()
        .map(|q| (q.id.clone(), q.max_value()))
        .collect();
    let result = ikdc.score(&complete);
    let submission = prepare_submission("user-1", &complete, &result).unwrap();
    assert_eq!(submission.id, "user-1");
    assert_eq!(submission.instrument, InstrumentKind::Ikdc);
    assert_eq!(submission.data, complete);
}

#[test]
fn results_serialize_with_instrument_tag() {
    let result = compute_score("lysholm_tegner", &AnswerSet::new()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["instrument"], "LYSHOLM-TEGNER");
    assert_eq!(json["lysholm"]["score"], 0.0);
    assert_eq!(json["tegner"]["label"], "");

    let back: ScoreResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn womac_reports_a_band_per_section_and_total() {
    let result = compute_score("womac", &AnswerSet::new()).unwrap();
    let bands = result.interpretations();
    let measures: Vec<&str> = bands.iter().map(|b| b.measure.as_str()).collect();
    assert_eq!(measures, vec!["pain", "stiffness", "function", "total"]);
    assert!(bands.iter().all(|b| b.band.label == "Ninguno"));
}

#[test]
fn invalid_ikdc_has_no_interpretation() {
    let result = compute_score("ikdc", &AnswerSet::new()).unwrap();
    assert!(result.interpretations().is_empty());
}
