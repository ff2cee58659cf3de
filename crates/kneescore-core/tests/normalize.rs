use kneescore_core::error::CoreError;
use kneescore_core::models::answer::{AnswerSet, AnswerValue};
use kneescore_core::normalize::{normalize, RawAnswers};
use serde_json::json;

#[test]
fn map_coerces_numeric_strings() {
    let set = normalize(json!({"a": "3", "b": 4}));
    assert_eq!(set.len(), 2);
    assert_eq!(set.number("a"), Some(3.0));
    assert_eq!(set.number("b"), Some(4.0));
}

#[test]
fn pairs_coerce_numeric_strings() {
    let set = normalize(json!([{"id": "a", "value": "3"}]));
    let expected: AnswerSet = [("a", 3.0)].into_iter().collect();
    assert_eq!(set, expected);
}

#[test]
fn null_normalizes_to_empty() {
    assert!(normalize(json!(null)).is_empty());
    assert!(normalize(json!(42)).is_empty());
    assert!(normalize(json!("q1=3")).is_empty());
    assert!(normalize(json!([])).is_empty());
}

#[test]
fn pairs_accept_alternate_key_names() {
    let set = normalize(json!([
        {"qid": "S1", "answer": 2},
        {"key": "S2", "val": "1"},
        {"id": "S3", "qid": "ignored", "value": 0},
    ]));
    assert_eq!(set.number("S1"), Some(2.0));
    assert_eq!(set.number("S2"), Some(1.0));
    assert_eq!(set.number("S3"), Some(0.0));
    assert!(set.get("ignored").is_none());
}

#[test]
fn pairs_skip_malformed_records() {
    let set = normalize(json!([
        null,
        "S1",
        {"value": 3},
        {"id": "S2"},
        {"id": "S3", "value": null},
        {"id": "S4", "value": 1},
    ]));
    assert_eq!(set.len(), 1);
    assert_eq!(set.number("S4"), Some(1.0));
}

#[test]
fn null_id_falls_back_to_next_key() {
    let set = normalize(json!([{"id": null, "qid": "P1", "value": null, "answer": 4}]));
    assert_eq!(set.number("P1"), Some(4.0));
}

#[test]
fn unparseable_values_pass_through() {
    let set = normalize(json!({"a": "mucho", "b": "", "c": true, "d": "  2.5 "}));
    assert_eq!(set.get("a"), Some(&AnswerValue::Other(json!("mucho"))));
    assert_eq!(set.number("a"), None);
    assert_eq!(set.get("b"), Some(&AnswerValue::Other(json!(""))));
    assert_eq!(set.get("c"), Some(&AnswerValue::Other(json!(true))));
    assert_eq!(set.number("d"), Some(2.5));
}

#[test]
fn null_map_values_are_dropped() {
    let set = normalize(json!({"a": null, "b": 1}));
    assert!(set.get("a").is_none());
    assert_eq!(set.len(), 1);
}

#[test]
fn record_unwraps_data_then_answers() {
    let set = RawAnswers::from_record(json!({"id": "owner-1", "data": {"q1": 2}})).normalize();
    assert_eq!(set.number("q1"), Some(2.0));
    assert!(set.get("id").is_none());

    let set = RawAnswers::from_record(json!({"data": null, "answers": [{"id": "q2", "value": 1}]}))
        .normalize();
    assert_eq!(set.number("q2"), Some(1.0));

    let set = RawAnswers::from_record(json!({"q3": "4"})).normalize();
    assert_eq!(set.number("q3"), Some(4.0));
}

#[test]
fn raw_shape_is_classified() {
    assert!(matches!(RawAnswers::from_json(json!({})), RawAnswers::Map(_)));
    assert!(matches!(RawAnswers::from_json(json!([])), RawAnswers::Pairs(_)));
    assert_eq!(RawAnswers::from_json(json!(null)), RawAnswers::Empty);
}

#[test]
fn parse_record_decodes_text() {
    let raw = RawAnswers::parse_record(r#"{"answers": {"q1": "3"}}"#).unwrap();
    assert_eq!(raw.normalize().number("q1"), Some(3.0));

    let err = RawAnswers::parse_record("{not json").unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
}
