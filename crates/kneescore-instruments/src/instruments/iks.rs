use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use kneescore_core::models::answer::{AnswerSet, AnswerValue};
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_core::models::question::{AnswerOption, Question};

use crate::scoring::ScoreResult;
use crate::Instrument;

/// Flexion at or beyond which full mobility points are awarded.
pub const FULL_FLEXION_DEGREES: f64 = 125.0;
pub const MAX_MOBILITY_POINTS: f64 = 25.0;
/// One mobility point is lost per full step of this many degrees.
pub const FLEXION_STEP_DEGREES: f64 = 5.0;

const SEVERE_MALALIGNMENT_DEDUCTION: f64 = -20.0;

/// IKS / KSS: Knee Society Score.
///
/// Two independent 0–100 scores composed from clinician measurements: a
/// knee score (pain, range of motion, stability, minus deductions) and a
/// function score (walking, stairs, minus walking-aid deduction).
pub struct Iks;

/// Resolved measurements, one per formula input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IksInput {
    pub pain_pts: Option<f64>,
    pub flex_deg: Option<f64>,
    pub ap_pts: Option<f64>,
    pub ml_pts: Option<f64>,
    pub contracture_deg: Option<f64>,
    pub ext_def_deg: Option<f64>,
    pub alignment: Alignment,
    pub walk_pts: Option<f64>,
    pub stairs_pts: Option<f64>,
    pub aids_deduction: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alignment {
    pub degrees: Option<f64>,
    /// A deformity other than varus/valgus within 0–15°.
    pub other: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IksScores {
    pub mobility_pts: f64,
    pub stability_pts: f64,
    /// Pain + mobility + stability, before deductions.
    pub knee_positive: f64,
    /// Sum of the three knee deductions (zero or negative).
    pub knee_deductions: f64,
    pub knee_score: f64,
    /// Walk + stairs + aids, before clamping.
    pub function_raw: f64,
    pub function_score: f64,
    /// Mandatory inputs that were present in the answers.
    pub inputs_present: usize,
    /// Mandatory inputs that were absent and counted as 0. The scores are
    /// not gated on these; callers decide whether to show them.
    pub inputs_missing: Vec<String>,
}

/// Canonical answer id followed by legacy aliases.
const PAIN_KEYS: [&str; 3] = ["painPts", "pain_points", "pain"];
const FLEX_KEYS: [&str; 3] = ["flexDeg", "flex_degrees", "flex"];
const AP_KEYS: [&str; 3] = ["apPts", "ap_points", "ap"];
const ML_KEYS: [&str; 3] = ["mlPts", "ml_points", "ml"];
const CONTRACTURE_KEYS: [&str; 3] = ["contractureDeg", "contracture_deg", "contracture"];
const EXT_DEF_KEYS: [&str; 3] = ["extDefDeg", "extension_deficit_deg", "extDef"];
const ALIGN_KEYS: [&str; 3] = ["alignDegrees", "alignment_deg", "align"];
const ALIGN_OTHER_KEY: &str = "alignOther";
const WALK_KEYS: [&str; 3] = ["walkPts", "walk_points", "walk"];
const STAIRS_KEYS: [&str; 3] = ["stairsPts", "stairs_points", "stairs"];
const AIDS_KEYS: [&str; 3] = ["aidsDeduction", "aids_deduction", "aids"];

impl IksInput {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            pain_pts: answers.first_number(&PAIN_KEYS),
            flex_deg: answers.first_number(&FLEX_KEYS),
            ap_pts: answers.first_number(&AP_KEYS),
            ml_pts: answers.first_number(&ML_KEYS),
            contracture_deg: answers.first_number(&CONTRACTURE_KEYS),
            ext_def_deg: answers.first_number(&EXT_DEF_KEYS),
            alignment: Alignment {
                degrees: answers.first_number(&ALIGN_KEYS),
                other: answers
                    .get(ALIGN_OTHER_KEY)
                    .is_some_and(AnswerValue::as_flag),
            },
            walk_pts: answers.first_number(&WALK_KEYS),
            stairs_pts: answers.first_number(&STAIRS_KEYS),
            aids_deduction: answers.first_number(&AIDS_KEYS),
        }
    }

    /// The point-bearing inputs by canonical id. Deductions default to
    /// none and are not part of this list.
    fn mandatory(&self) -> [(&'static str, Option<f64>); 6] {
        [
            (PAIN_KEYS[0], self.pain_pts),
            (FLEX_KEYS[0], self.flex_deg),
            (AP_KEYS[0], self.ap_pts),
            (ML_KEYS[0], self.ml_pts),
            (WALK_KEYS[0], self.walk_pts),
            (STAIRS_KEYS[0], self.stairs_pts),
        ]
    }

    /// Canonical ids of the mandatory inputs that are absent.
    pub fn missing(&self) -> Vec<String> {
        self.mandatory()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

impl Instrument for Iks {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Iks
    }

    fn name(&self) -> &str {
        "IKS / KSS"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerSet) -> ScoreResult {
        ScoreResult::Iks(compute_iks_scores(&IksInput::from_answers(answers)))
    }
}

/// Mobility points from maximum flexion: 25 at 125° or more, one point
/// less per full 5° short of that, never below 0.
pub fn points_from_flexion(flex_deg: f64) -> f64 {
    if flex_deg.is_nan() {
        return 0.0;
    }
    if flex_deg >= FULL_FLEXION_DEGREES {
        return MAX_MOBILITY_POINTS;
    }
    let steps = ((FULL_FLEXION_DEGREES - flex_deg) / FLEXION_STEP_DEGREES).floor();
    (MAX_MOBILITY_POINTS - steps).max(0.0)
}

/// Tiers: (0,10] → −2, (10,15] → −5, (15,20] → −10, above 20 → −15.
/// Zero or negative contracture deducts nothing.
pub fn deduction_from_flexion_contracture(deg: f64) -> f64 {
    if deg.is_nan() || deg <= 0.0 {
        0.0
    } else if deg <= 10.0 {
        -2.0
    } else if deg <= 15.0 {
        -5.0
    } else if deg <= 20.0 {
        -10.0
    } else {
        -15.0
    }
}

/// Tiers: below 11 → −5, [11,20] → −10, above 20 → −15.
/// Zero or negative deficit deducts nothing.
pub fn deduction_from_active_extension_deficit(deg: f64) -> f64 {
    if deg.is_nan() || deg <= 0.0 {
        0.0
    } else if deg < 11.0 {
        -5.0
    } else if deg <= 20.0 {
        -10.0
    } else {
        -15.0
    }
}

/// 5–10° is neutral. Under-correction (0–5°) and over-correction
/// (10–15°) cost 3 points per degree; anything outside 0–15° or an
/// "other" deformity costs a flat 20. Unknown degrees deduct nothing.
pub fn deduction_from_alignment(alignment: Alignment) -> f64 {
    if alignment.other {
        return SEVERE_MALALIGNMENT_DEDUCTION;
    }
    let Some(d) = alignment.degrees.filter(|d| !d.is_nan()) else {
        return 0.0;
    };
    if (5.0..=10.0).contains(&d) {
        0.0
    } else if (0.0..5.0).contains(&d) {
        -3.0 * (5.0 - d)
    } else if d > 10.0 && d <= 15.0 {
        -3.0 * (d - 10.0)
    } else {
        SEVERE_MALALIGNMENT_DEDUCTION
    }
}

pub fn clamp_score(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

/// Missing inputs count as 0; missing flexion earns no mobility points.
pub fn compute_iks_scores(input: &IksInput) -> IksScores {
    let missing = input.missing();
    if !missing.is_empty() {
        tracing::debug!(?missing, "IKS inputs missing, counted as 0");
    }

    let mobility_pts = input.flex_deg.map_or(0.0, points_from_flexion);
    let stability_pts = input.ap_pts.unwrap_or(0.0) + input.ml_pts.unwrap_or(0.0);
    let knee_positive = input.pain_pts.unwrap_or(0.0) + mobility_pts + stability_pts;

    let knee_deductions = deduction_from_flexion_contracture(input.contracture_deg.unwrap_or(0.0))
        + deduction_from_active_extension_deficit(input.ext_def_deg.unwrap_or(0.0))
        + deduction_from_alignment(input.alignment);

    let function_raw = input.walk_pts.unwrap_or(0.0)
        + input.stairs_pts.unwrap_or(0.0)
        + input.aids_deduction.unwrap_or(0.0);

    IksScores {
        mobility_pts,
        stability_pts,
        knee_positive,
        knee_deductions,
        knee_score: clamp_score(knee_positive + knee_deductions),
        function_raw,
        function_score: clamp_score(function_raw),
        inputs_present: input.mandatory().len() - missing.len(),
        inputs_missing: missing,
    }
}

fn opts(pairs: &[(&str, f64)]) -> Vec<AnswerOption> {
    pairs
        .iter()
        .map(|(label, value)| AnswerOption::new(*label, *value))
        .collect()
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    vec![
        Question::radio(
            PAIN_KEYS[0],
            "Dolor",
            opts(&[
                ("Ninguno", 50.0),
                ("Leve u ocasional", 45.0),
                ("Sólo en las escaleras", 40.0),
                ("Al caminar y en escaleras", 30.0),
                ("Moderado, ocasional", 20.0),
                ("Moderado, permanente", 10.0),
                ("Intenso", 0.0),
            ]),
        )
        .in_section("knee"),
        Question::scale(FLEX_KEYS[0], "Flexión máxima (grados)", 0.0, 150.0).in_section("knee"),
        Question::radio(
            AP_KEYS[0],
            "Estabilidad anteroposterior",
            opts(&[("< 5 mm", 10.0), ("5 – 10 mm", 5.0), ("> 10 mm", 0.0)]),
        )
        .in_section("knee"),
        Question::radio(
            ML_KEYS[0],
            "Estabilidad mediolateral",
            opts(&[("< 5°", 15.0), ("6° – 9°", 10.0), ("10° – 14°", 0.0)]),
        )
        .in_section("knee"),
        Question::scale(CONTRACTURE_KEYS[0], "Flexum / contractura en flexión (grados)", 0.0, 60.0)
            .in_section("knee"),
        Question::scale(EXT_DEF_KEYS[0], "Déficit de extensión activa (grados)", 0.0, 60.0)
            .in_section("knee"),
        Question::scale(ALIGN_KEYS[0], "Alineación anatómica (grados)", 0.0, 40.0).in_section("knee"),
        Question::radio(
            ALIGN_OTHER_KEY,
            "Otra deformidad de alineación",
            opts(&[("No", 0.0), ("Sí", 1.0)]),
        )
        .in_section("knee"),
        Question::radio(
            WALK_KEYS[0],
            "Marcha",
            opts(&[
                ("Ilimitado", 50.0),
                ("≈ 1000 m", 40.0),
                ("500 – 1000 m", 30.0),
                ("< 500 m", 20.0),
                ("Sólo en el domicilio", 10.0),
                ("Incapacidad", 0.0),
            ]),
        )
        .in_section("function"),
        Question::radio(
            STAIRS_KEYS[0],
            "Escaleras",
            opts(&[
                ("Sube/baja normal", 50.0),
                ("Sube normal, baja con rampa", 40.0),
                ("Sube y baja con rampa", 30.0),
                ("Sube con rampa y baja asimétrica", 15.0),
                ("Sube y baja asimétricas", 10.0),
                ("Imposibles", 0.0),
            ]),
        )
        .in_section("function"),
        Question::radio(
            AIDS_KEYS[0],
            "Ayudas para la marcha",
            opts(&[
                ("Sin bastón", 0.0),
                ("Un bastón", -5.0),
                ("Dos bastones", -10.0),
                ("Bastón inglés o andador", -20.0),
            ]),
        )
        .in_section("function"),
    ]
});
