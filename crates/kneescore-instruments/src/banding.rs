//! Qualitative interpretation bands.
//!
//! Banding is presentation metadata derived after scoring; it never feeds
//! back into a numeric score.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which edge of a band belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BandEdge {
    /// `[lower, next lower)`: a score on a boundary belongs to the higher band.
    LowerInclusive,
    /// `(previous upper, upper]`: a score on a boundary belongs to the lower band.
    UpperInclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationBand {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Hex colour suggested for rendering the band.
    pub color_hint: String,
}

impl InterpretationBand {
    fn new(label: &str, lower_bound: f64, upper_bound: f64, color_hint: &str) -> Self {
        Self {
            label: label.to_string(),
            description: None,
            lower_bound,
            upper_bound,
            color_hint: color_hint.to_string(),
        }
    }

    fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// An ordered, non-overlapping partition of a score range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandTable {
    /// Ascending by bound.
    pub bands: Vec<InterpretationBand>,
    pub edge: BandEdge,
}

impl BandTable {
    /// The band `score` falls in. Scores beyond the declared range land in
    /// the nearest end band; only an empty table yields `None`.
    pub fn classify(&self, score: f64) -> Option<&InterpretationBand> {
        let found = match self.edge {
            BandEdge::LowerInclusive => self.bands.iter().rev().find(|b| score >= b.lower_bound),
            BandEdge::UpperInclusive => self.bands.iter().find(|b| score <= b.upper_bound),
        };
        let fallback = match self.edge {
            BandEdge::LowerInclusive => self.bands.first(),
            BandEdge::UpperInclusive => self.bands.last(),
        };
        found.or(fallback)
    }
}

/// A score paired with the band it falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    /// What was banded, e.g. `"total"` or `"pain"`.
    pub measure: String,
    pub score: f64,
    pub band: InterpretationBand,
}

impl Interpretation {
    pub fn new(measure: &str, score: f64, table: &BandTable) -> Option<Self> {
        table.classify(score).map(|band| Self {
            measure: measure.to_string(),
            score,
            band: band.clone(),
        })
    }
}

const GREEN: &str = "#16a34a";
const LIGHT_GREEN: &str = "#22c55e";
const AMBER: &str = "#ca8a04";
const ORANGE: &str = "#ea580c";
const RED: &str = "#dc2626";

/// IKDC: 90–100 excellent, 70–89 good, 50–69 moderate, below 50 low.
pub fn ikdc_bands() -> &'static BandTable {
    static TABLE: LazyLock<BandTable> = LazyLock::new(|| BandTable {
        bands: vec![
            InterpretationBand::new("Baja", 0.0, 50.0, RED)
                .described("Limitación significativa; consultar profesional"),
            InterpretationBand::new("Moderada", 50.0, 70.0, AMBER)
                .described("Limitaciones moderadas, dar seguimiento"),
            InterpretationBand::new("Buena", 70.0, 90.0, LIGHT_GREEN)
                .described("Limitaciones mínimas"),
            InterpretationBand::new("Excelente", 90.0, 100.0, GREEN)
                .described("Función óptima, sin limitaciones"),
        ],
        edge: BandEdge::LowerInclusive,
    });
    &TABLE
}

/// Lysholm: 84–100 very good/good, 65–83 fair, below 65 poor.
pub fn lysholm_bands() -> &'static BandTable {
    static TABLE: LazyLock<BandTable> = LazyLock::new(|| BandTable {
        bands: vec![
            InterpretationBand::new("Malo", 0.0, 65.0, RED),
            InterpretationBand::new("Regular", 65.0, 84.0, AMBER),
            InterpretationBand::new("Muy bueno / Bueno", 84.0, 100.0, GREEN),
        ],
        edge: BandEdge::LowerInclusive,
    });
    &TABLE
}

/// WOMAC severity over a normalized 0–100 percentage. Only an exact 0 is
/// "none"; each further band includes its upper bound.
pub fn womac_severity_bands() -> &'static BandTable {
    static TABLE: LazyLock<BandTable> = LazyLock::new(|| BandTable {
        bands: vec![
            InterpretationBand::new("Ninguno", 0.0, 0.0, GREEN),
            InterpretationBand::new("Leve", 0.0, 25.0, LIGHT_GREEN),
            InterpretationBand::new("Moderado", 25.0, 50.0, AMBER),
            InterpretationBand::new("Severo", 50.0, 75.0, ORANGE),
            InterpretationBand::new("Muy severo", 75.0, 100.0, RED),
        ],
        edge: BandEdge::UpperInclusive,
    });
    &TABLE
}
