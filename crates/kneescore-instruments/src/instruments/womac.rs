use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_core::models::question::{AnswerOption, Question};

use crate::scoring::{percent_of, ScoreResult};
use crate::Instrument;

/// WOMAC Osteoarthritis Index.
/// Pain (5), stiffness (2) and physical function (17) items rated 0–4.
/// Normalized as a percentage of the maximum where 0% is no symptoms.
/// No completeness gate: partial answers still produce a score.
pub struct Womac;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WomacSection {
    Pain,
    Stiffness,
    Function,
}

impl WomacSection {
    pub const ALL: [WomacSection; 3] = [WomacSection::Pain, WomacSection::Stiffness, WomacSection::Function];

    pub fn id(self) -> &'static str {
        match self {
            WomacSection::Pain => "pain",
            WomacSection::Stiffness => "stiffness",
            WomacSection::Function => "function",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WomacSection::Pain => "Apartado A: Dolor",
            WomacSection::Stiffness => "Apartado B: Rigidez",
            WomacSection::Function => "Apartado C: Capacidad Funcional",
        }
    }
}

/// One number per section plus their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WomacBreakdown {
    pub pain: f64,
    pub stiffness: f64,
    pub function: f64,
    pub total: f64,
}

impl WomacBreakdown {
    fn section_mut(&mut self, section: WomacSection) -> &mut f64 {
        match section {
            WomacSection::Pain => &mut self.pain,
            WomacSection::Stiffness => &mut self.stiffness,
            WomacSection::Function => &mut self.function,
        }
    }

    fn with_total(mut self) -> Self {
        self.total = self.pain + self.stiffness + self.function;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WomacScores {
    /// Raw sums over the answered items.
    pub raw: WomacBreakdown,
    /// Maximum attainable per section (20 / 8 / 68, total 96).
    pub max: WomacBreakdown,
    /// `round(raw / max × 100)` per section and for the total.
    pub normalized: WomacBreakdown,
    pub answered: usize,
    pub max_answered: usize,
}

impl Instrument for Womac {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Womac
    }

    fn name(&self) -> &str {
        "WOMAC"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerSet) -> ScoreResult {
        ScoreResult::Womac(compute_womac_scores(answers, self.questions()))
    }
}

pub fn compute_womac_scores(answers: &AnswerSet, questions: &[Question]) -> WomacScores {
    let mut raw = WomacBreakdown::default();
    let mut max = WomacBreakdown::default();
    let mut answered = 0;

    for question in questions {
        let Some(section) = WomacSection::ALL
            .into_iter()
            .find(|s| question.section.as_deref() == Some(s.id()))
        else {
            continue;
        };
        *max.section_mut(section) += question.max_value();
        if let Some(value) = answers.number(&question.id) {
            *raw.section_mut(section) += value;
            answered += 1;
        }
    }

    let raw = raw.with_total();
    let max = max.with_total();
    let normalized = WomacBreakdown {
        pain: percent_of(raw.pain, max.pain),
        stiffness: percent_of(raw.stiffness, max.stiffness),
        function: percent_of(raw.function, max.function),
        total: percent_of(raw.total, max.total),
    };

    WomacScores {
        raw,
        max,
        normalized,
        answered,
        max_answered: questions.len(),
    }
}

fn options() -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("Ninguno/a", 0.0),
        AnswerOption::new("Poco/a", 1.0),
        AnswerOption::new("Bastante", 2.0),
        AnswerOption::new("Mucho/a", 3.0),
        AnswerOption::new("Muchísimo/a", 4.0),
    ]
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let pain = [
        "Andar por un terreno llano.",
        "Subir o bajar escaleras.",
        "Por la noche en la cama.",
        "Estar sentado o tumbado.",
        "Estar de pie.",
    ];
    let stiffness = [
        "Después de despertarse por la mañana.",
        "Tras estar sentado, tumbado o descansando.",
    ];
    let function = [
        "Bajar las escaleras.",
        "Subir las escaleras.",
        "Levantarse después de estar sentado.",
        "Estar de pie.",
        "Agacharse para coger algo del suelo.",
        "Andar por un terreno llano.",
        "Entrar y salir de un coche.",
        "Ir de compras.",
        "Ponerse las medias o calcetines.",
        "Levantarse de la cama.",
        "Quitarse las medias o calcetines.",
        "Estar tumbado en la cama.",
        "Entrar y salir de la ducha/bañera.",
        "Estar sentado.",
        "Sentarse y levantarse del retrete.",
        "Hacer tareas domésticas pesadas.",
        "Hacer tareas domésticas ligeras.",
    ];

    let section = |section: WomacSection, texts: &[&str]| -> Vec<Question> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                Question::radio(format!("{}_{}", section.id(), i + 1), *text, options())
                    .in_section(section.id())
            })
            .collect()
    };

    [
        section(WomacSection::Pain, &pain),
        section(WomacSection::Stiffness, &stiffness),
        section(WomacSection::Function, &function),
    ]
    .concat()
});
