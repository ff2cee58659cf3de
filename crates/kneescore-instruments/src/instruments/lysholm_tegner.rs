use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_core::models::question::{AnswerOption, Question};

use crate::scoring::ScoreResult;
use crate::Instrument;

pub const TEGNER_ID: &str = "tegner";

/// Lysholm Knee Scoring Scale with the Tegner Activity Level.
///
/// Eight Lysholm items with unequal weights (5, 5, 15, 25, 25, 10, 10, 5)
/// summed to a 0–100 raw score, plus a single Tegner activity level (0–10)
/// reported on its own.
pub struct LysholmTegner;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LysholmScore {
    /// Sum of the answered items. Unanswered items add nothing.
    pub score: f64,
    pub max: f64,
    pub answered_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TegnerLevel {
    pub value: Option<f64>,
    /// Label of the option matching `value` exactly; empty otherwise.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LysholmTegnerScore {
    pub lysholm: LysholmScore,
    pub tegner: TegnerLevel,
}

impl Instrument for LysholmTegner {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::LysholmTegner
    }

    fn name(&self) -> &str {
        "Lysholm / Tegner"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerSet) -> ScoreResult {
        let (lysholm, tegner) = split_questions(self.questions());
        ScoreResult::LysholmTegner(LysholmTegnerScore {
            lysholm: compute_lysholm_score(answers, lysholm),
            tegner: match tegner {
                Some(question) => resolve_tegner(answers.number(&question.id), question),
                None => TegnerLevel {
                    value: None,
                    label: String::new(),
                },
            },
        })
    }
}

/// Separate the Lysholm items from the trailing Tegner question.
pub fn split_questions(questions: &[Question]) -> (&[Question], Option<&Question>) {
    match questions.split_last() {
        Some((last, rest)) if last.id == TEGNER_ID => (rest, Some(last)),
        _ => (questions, None),
    }
}

pub fn compute_lysholm_score(answers: &AnswerSet, questions: &[Question]) -> LysholmScore {
    let answered: Vec<f64> = questions.iter().filter_map(|q| answers.number(&q.id)).collect();
    LysholmScore {
        score: answered.iter().sum(),
        max: questions.iter().map(|q| q.max_value()).sum(),
        answered_count: answered.len(),
    }
}

/// Exact-match label lookup: no interpolation, no clamping.
pub fn resolve_tegner(value: Option<f64>, question: &Question) -> TegnerLevel {
    let label = value
        .and_then(|v| question.option_label(v))
        .unwrap_or_default()
        .to_string();
    TegnerLevel { value, label }
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let opts = |pairs: &[(&str, f64)]| -> Vec<AnswerOption> {
        pairs.iter().map(|(label, value)| AnswerOption::new(*label, *value)).collect()
    };

    vec![
        Question::radio(
            "limp",
            "Cojera",
            opts(&[("Ninguna", 5.0), ("Leve u ocasional", 3.0), ("Acentuada y constante", 0.0)]),
        ),
        Question::radio(
            "support",
            "Apoyo",
            opts(&[("Ninguno", 5.0), ("Bastón o muleta", 2.0), ("Bipedestación imposible", 0.0)]),
        ),
        Question::radio(
            "locking",
            "Bloqueo y enganche",
            opts(&[
                ("Ninguno", 15.0),
                ("Enganche sin bloqueo", 10.0),
                ("Bloqueo ocasional", 6.0),
                ("Bloqueo frecuente", 2.0),
                ("Bloqueo persistente durante el examen", 0.0),
            ]),
        ),
        Question::radio(
            "instability",
            "Inestabilidad (sensación de que la rodilla \"falla\")",
            opts(&[
                ("Ninguna debilidad", 25.0),
                ("Rara vez durante ejercicio intenso", 20.0),
                ("Frecuente durante ejercicios intensos o que impiden la actividad deportiva", 15.0),
                ("Ocasional en la vida cotidiana", 10.0),
                ("Frecuente en la vida cotidiana", 5.0),
                ("A cada paso", 0.0),
            ]),
        ),
        Question::radio(
            "pain",
            "Dolor",
            opts(&[
                ("Ninguno", 25.0),
                ("Inconstante o leve durante ejercicios intensos", 20.0),
                ("Intenso durante ejercicios intensos", 15.0),
                ("Intenso tras una marcha > 2 km", 10.0),
                ("Intenso tras una marcha < 2 km", 5.0),
                ("Constante", 0.0),
            ]),
        ),
        Question::radio(
            "swelling",
            "Hinchazón",
            opts(&[
                ("Ninguna", 10.0),
                ("Durante ejercicios intensos", 6.0),
                ("Durante actividades comunes", 2.0),
                ("Constante", 0.0),
            ]),
        ),
        Question::radio(
            "stairs",
            "Subida de escaleras",
            opts(&[
                ("Normal", 10.0),
                ("Dificultad leve", 6.0),
                ("Un peldaño a la vez", 2.0),
                ("Imposible", 0.0),
            ]),
        ),
        Question::radio(
            "squatting",
            "Ponerse en cuclillas",
            opts(&[
                ("Sin dificultad", 5.0),
                ("Dificultad leve", 4.0),
                ("No por encima de 90°", 2.0),
                ("Imposible", 0.0),
            ]),
        ),
        Question::radio(
            TEGNER_ID,
            "Escala de Actividad de Tegner",
            opts(&[
                ("Nivel 10: Competición nacional/internacional (fútbol)", 10.0),
                ("Nivel 9: Competición nivel inferior (fútbol, hockey, gimnasia)", 9.0),
                ("Nivel 8: Competición (squash, bádminton, salto, esquí)", 8.0),
                ("Nivel 7: Competición (tenis, carrera, motocross, balonmano, básquet)", 7.0),
                ("Nivel 6: Recreo (fútbol, hockey, squash, atletismo, cross)", 6.0),
                ("Nivel 5: Recreo (tenis, bádminton, balonmano, básquet, esquí, jogging)", 5.0),
                ("Nivel 4: Competición (ciclismo)", 4.0),
                ("Nivel 3: Recreación (jogging 2/semana en suelo irregular)", 3.0),
                ("Nivel 2: Trabajo pesado (construcción, etc.)", 2.0),
                ("Nivel 1: Recreo (ciclismo, jogging en terreno plano)", 1.0),
                ("Nivel 0: Actividad moderada / trabajo ligero / sedentario", 0.0),
            ]),
        )
        .excluded_from_score(),
    ]
});
