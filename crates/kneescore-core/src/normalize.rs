//! Raw answer normalization.
//!
//! Answers reach the scorer in two shapes: an object keyed by question id,
//! or a list of `{id, value}` records whose key names vary between form
//! versions. [`RawAnswers`] names the shape explicitly; each variant has its
//! own conversion into an [`AnswerSet`]. Normalization never fails: bad
//! shapes degrade to an empty or partial set, which the scorers then report
//! as incomplete. Only decoding JSON text can fail.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::models::answer::{AnswerSet, AnswerValue};

const ID_KEYS: [&str; 3] = ["id", "qid", "key"];
const VALUE_KEYS: [&str; 3] = ["value", "answer", "val"];

/// Envelope fields that may wrap the answers in a stored record.
const RECORD_KEYS: [&str; 2] = ["data", "answers"];

/// A raw answers payload, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAnswers {
    /// `{"q1": 3, "q2": "4"}`
    Map(Map<String, Value>),
    /// `[{"id": "q1", "value": 3}, {"qid": "q2", "answer": "4"}]`
    Pairs(Vec<Value>),
    /// Anything else, including `null`.
    Empty,
}

impl RawAnswers {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => RawAnswers::Map(map),
            Value::Array(items) => RawAnswers::Pairs(items),
            _ => RawAnswers::Empty,
        }
    }

    /// Classify a record as returned by the answers backend, where the
    /// payload may sit under `data` or `answers`.
    pub fn from_record(record: Value) -> Self {
        let record = match record {
            Value::Object(mut map) => {
                match RECORD_KEYS
                    .iter()
                    .find(|k| map.get(**k).is_some_and(|v| !v.is_null()))
                {
                    Some(key) => map.remove(*key).unwrap_or(Value::Null),
                    None => Value::Object(map),
                }
            }
            other => other,
        };
        Self::from_json(record)
    }

    /// Decode JSON text, then classify it as a stored record.
    pub fn parse_record(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_record(value))
    }

    pub fn normalize(self) -> AnswerSet {
        match self {
            RawAnswers::Map(map) => normalize_map(map),
            RawAnswers::Pairs(items) => normalize_pairs(items),
            RawAnswers::Empty => AnswerSet::new(),
        }
    }
}

/// Normalize any JSON value into an answer set.
pub fn normalize(raw: Value) -> AnswerSet {
    RawAnswers::from_json(raw).normalize()
}

fn normalize_map(map: Map<String, Value>) -> AnswerSet {
    map.into_iter()
        .filter_map(|(id, value)| coerce(value).map(|v| (id, v)))
        .collect()
}

fn normalize_pairs(items: Vec<Value>) -> AnswerSet {
    let mut out = AnswerSet::new();
    for item in items {
        let Value::Object(record) = item else {
            tracing::trace!("skipping non-object answer record");
            continue;
        };
        let Some(id) = first_non_null(&record, &ID_KEYS).and_then(record_id) else {
            tracing::debug!("skipping answer record without an id");
            continue;
        };
        let Some(value) = first_non_null(&record, &VALUE_KEYS).cloned().and_then(coerce) else {
            tracing::debug!(%id, "skipping answer record without a value");
            continue;
        };
        out.extend([(id, value)]);
    }
    out
}

fn first_non_null<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
}

fn record_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings become `Number`; `null` is dropped; every
/// other value passes through untouched.
fn coerce(value: Value) -> Option<AnswerValue> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(match n.as_f64().filter(|f| f.is_finite()) {
            Some(f) => AnswerValue::Number(f),
            None => AnswerValue::Other(Value::Number(n)),
        }),
        Value::String(s) => Some(match parse_number(&s) {
            Some(f) => AnswerValue::Number(f),
            None => AnswerValue::Other(Value::String(s)),
        }),
        other => Some(AnswerValue::Other(other)),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}
