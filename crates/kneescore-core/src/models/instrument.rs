use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The five supported knee questionnaires.
///
/// Serializes as the upper-case code the backend stores in the `type`
/// field of a submission (e.g. `"LYSHOLM-TEGNER"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InstrumentKind {
    #[serde(rename = "IKDC")]
    Ikdc,
    #[serde(rename = "KOOS")]
    Koos,
    #[serde(rename = "WOMAC")]
    Womac,
    #[serde(rename = "LYSHOLM-TEGNER")]
    LysholmTegner,
    #[serde(rename = "IKS")]
    Iks,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 5] = [
        InstrumentKind::Ikdc,
        InstrumentKind::Koos,
        InstrumentKind::Womac,
        InstrumentKind::LysholmTegner,
        InstrumentKind::Iks,
    ];

    /// Backend code, as sent in the submission `type` field.
    pub fn code(self) -> &'static str {
        match self {
            InstrumentKind::Ikdc => "IKDC",
            InstrumentKind::Koos => "KOOS",
            InstrumentKind::Womac => "WOMAC",
            InstrumentKind::LysholmTegner => "LYSHOLM-TEGNER",
            InstrumentKind::Iks => "IKS",
        }
    }

    /// Lower-case registry identifier (e.g. `"lysholm_tegner"`).
    pub fn id(self) -> &'static str {
        match self {
            InstrumentKind::Ikdc => "ikdc",
            InstrumentKind::Koos => "koos",
            InstrumentKind::Womac => "womac",
            InstrumentKind::LysholmTegner => "lysholm_tegner",
            InstrumentKind::Iks => "iks",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for InstrumentKind {
    type Err = CoreError;

    /// Accepts either the backend code or the registry id, ignoring case
    /// and treating `-` and `_` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        InstrumentKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| CoreError::UnknownInstrumentCode(s.to_string()))
    }
}
