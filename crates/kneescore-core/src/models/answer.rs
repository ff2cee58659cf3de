use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A recorded answer. Anything the normalizer could not read as a finite
/// number is kept verbatim in `Other` and counts as unanswered when scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Number(f64),
    Other(serde_json::Value),
}

impl AnswerValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Lenient boolean reading used for checkbox-style inputs.
    ///
    /// `true`, `"true"`, `"1"` and `1` are true; `false`, `"false"`, `"0"`
    /// and `0` are false; any other value is true when it is non-empty.
    pub fn as_flag(&self) -> bool {
        match self {
            AnswerValue::Number(n) => *n != 0.0 && !n.is_nan(),
            AnswerValue::Other(serde_json::Value::Bool(b)) => *b,
            AnswerValue::Other(serde_json::Value::String(s)) => match s.as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                other => !other.is_empty(),
            },
            AnswerValue::Other(serde_json::Value::Null) => false,
            AnswerValue::Other(_) => true,
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        AnswerValue::Number(f64::from(value))
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Other(serde_json::Value::Bool(value))
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Other(serde_json::Value::String(value.to_string()))
    }
}

/// Question id → answer, as consumed by every scorer.
///
/// Built once per scoring call and read-only afterwards; scorers only
/// ever borrow it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    /// The numeric answer for `id`, if one was recorded.
    pub fn number(&self, id: &str) -> Option<f64> {
        self.get(id).and_then(AnswerValue::as_number)
    }

    /// The first recorded numeric answer among several alternative ids.
    pub fn first_number(&self, ids: &[&str]) -> Option<f64> {
        ids.iter().find_map(|id| self.number(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
