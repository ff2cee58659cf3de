use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::AnswerSet;
use super::instrument::InstrumentKind;

/// The record posted to the answers backend once a questionnaire is done.
///
/// Wire shape: `{"id": "<owner>", "data": {...}, "type": "IKDC"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Submission {
    /// Owner (patient) identifier.
    pub id: String,
    pub data: AnswerSet,
    #[serde(rename = "type")]
    pub instrument: InstrumentKind,
}

impl Submission {
    pub fn new(owner_id: impl Into<String>, instrument: InstrumentKind, data: AnswerSet) -> Self {
        Self {
            id: owner_id.into(),
            data,
            instrument,
        }
    }
}
