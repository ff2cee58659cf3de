use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use kneescore_core::models::instrument::InstrumentKind;

use crate::banding::{self, Interpretation};
use crate::instruments::iks::IksScores;
use crate::instruments::ikdc::IkdcScore;
use crate::instruments::koos::KoosScores;
use crate::instruments::lysholm_tegner::LysholmTegnerScore;
use crate::instruments::womac::WomacScores;

/// The outcome of scoring one answer set, tagged by instrument.
///
/// A result with `is_valid() == false` still carries deterministic
/// placeholder numbers; they have no clinical meaning and must not be
/// shown as a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "instrument")]
#[ts(export)]
pub enum ScoreResult {
    #[serde(rename = "IKDC")]
    Ikdc(IkdcScore),
    #[serde(rename = "KOOS")]
    Koos(KoosScores),
    #[serde(rename = "WOMAC")]
    Womac(WomacScores),
    #[serde(rename = "LYSHOLM-TEGNER")]
    LysholmTegner(LysholmTegnerScore),
    #[serde(rename = "IKS")]
    Iks(IksScores),
}

impl ScoreResult {
    pub fn kind(&self) -> InstrumentKind {
        match self {
            ScoreResult::Ikdc(_) => InstrumentKind::Ikdc,
            ScoreResult::Koos(_) => InstrumentKind::Koos,
            ScoreResult::Womac(_) => InstrumentKind::Womac,
            ScoreResult::LysholmTegner(_) => InstrumentKind::LysholmTegner,
            ScoreResult::Iks(_) => InstrumentKind::Iks,
        }
    }

    /// IKDC is valid when its completeness floor is met; KOOS when at least
    /// one subscale is. WOMAC, Lysholm/Tegner and IKS have no gate.
    pub fn is_valid(&self) -> bool {
        match self {
            ScoreResult::Ikdc(s) => s.valid,
            ScoreResult::Koos(s) => s.subscales().any(|(_, sub)| sub.valid),
            ScoreResult::Womac(_) | ScoreResult::LysholmTegner(_) | ScoreResult::Iks(_) => true,
        }
    }

    /// Number of items that carried a numeric answer. IKS has no item
    /// list and counts the mandatory inputs that were present.
    pub fn answered(&self) -> usize {
        match self {
            ScoreResult::Ikdc(s) => s.answered,
            ScoreResult::Koos(s) => s.subscales().map(|(_, sub)| sub.answered).sum(),
            ScoreResult::Womac(s) => s.answered,
            ScoreResult::LysholmTegner(s) => s.lysholm.answered_count,
            ScoreResult::Iks(s) => s.inputs_present,
        }
    }

    /// Qualitative bands for each headline number that has a band table.
    /// Invalid IKDC results get none.
    pub fn interpretations(&self) -> Vec<Interpretation> {
        let banded = match self {
            ScoreResult::Ikdc(s) if s.valid => {
                vec![Interpretation::new("score", s.score, banding::ikdc_bands())]
            }
            ScoreResult::Ikdc(_) | ScoreResult::Koos(_) | ScoreResult::Iks(_) => Vec::new(),
            ScoreResult::Womac(s) => {
                let table = banding::womac_severity_bands();
                vec![
                    Interpretation::new("pain", s.normalized.pain, table),
                    Interpretation::new("stiffness", s.normalized.stiffness, table),
                    Interpretation::new("function", s.normalized.function, table),
                    Interpretation::new("total", s.normalized.total, table),
                ]
            }
            ScoreResult::LysholmTegner(s) => vec![Interpretation::new(
                "lysholm",
                s.lysholm.score,
                banding::lysholm_bands(),
            )],
        };
        banded.into_iter().flatten().collect()
    }
}

/// One independently scored partition of an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleScore {
    pub valid: bool,
    /// Raw sum of the answered items; 0 when the subscale is incomplete.
    pub sum: f64,
    pub answered: usize,
    /// Number of items the subscale defines.
    pub item_count: usize,
    /// `None` when the subscale failed its completeness rule.
    pub score: Option<f64>,
}

/// A numeric answer outside its question's declared domain.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct AnswerIssue {
    pub question_id: String,
    pub value: f64,
    pub message: String,
}

/// Round to the nearest integer; halves go toward positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to one decimal place, halves up.
pub fn round_to_tenth(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

/// `part / whole` as a whole-number percentage. An empty whole yields 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_half_up(part / whole * 100.0)
}
