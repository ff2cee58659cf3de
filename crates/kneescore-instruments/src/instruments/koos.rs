use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_core::models::question::{AnswerOption, Question};

use crate::scoring::{round_to_tenth, ScoreResult, SubscaleScore};
use crate::Instrument;

/// KOOS: Knee injury and Osteoarthritis Outcome Score.
/// 42 items rated 0–4 across five subscales, each scored 0–100 where 100
/// means no problems. There is no combined total.
pub struct Koos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum KoosSubscale {
    Symptoms,
    Pain,
    Adl,
    Sport,
    Qol,
}

impl KoosSubscale {
    pub const ALL: [KoosSubscale; 5] = [
        KoosSubscale::Symptoms,
        KoosSubscale::Pain,
        KoosSubscale::Adl,
        KoosSubscale::Sport,
        KoosSubscale::Qol,
    ];

    /// Section id used in the question registry.
    pub fn id(self) -> &'static str {
        match self {
            KoosSubscale::Symptoms => "symptoms",
            KoosSubscale::Pain => "pain",
            KoosSubscale::Adl => "adl",
            KoosSubscale::Sport => "sport",
            KoosSubscale::Qol => "qol",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            KoosSubscale::Symptoms => "Síntomas",
            KoosSubscale::Pain => "Dolor",
            KoosSubscale::Adl => "Función en la vida diaria",
            KoosSubscale::Sport => "Función en deportes y recreación",
            KoosSubscale::Qol => "Calidad de vida",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KoosScores {
    pub symptoms: SubscaleScore,
    pub pain: SubscaleScore,
    pub adl: SubscaleScore,
    pub sport: SubscaleScore,
    pub qol: SubscaleScore,
}

impl KoosScores {
    pub fn get(&self, subscale: KoosSubscale) -> &SubscaleScore {
        match subscale {
            KoosSubscale::Symptoms => &self.symptoms,
            KoosSubscale::Pain => &self.pain,
            KoosSubscale::Adl => &self.adl,
            KoosSubscale::Sport => &self.sport,
            KoosSubscale::Qol => &self.qol,
        }
    }

    pub fn subscales(&self) -> impl Iterator<Item = (KoosSubscale, &SubscaleScore)> {
        KoosSubscale::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl Instrument for Koos {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Koos
    }

    fn name(&self) -> &str {
        "KOOS"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerSet) -> ScoreResult {
        ScoreResult::Koos(compute_koos_scores(answers, self.questions()))
    }
}

pub fn compute_koos_scores(answers: &AnswerSet, questions: &[Question]) -> KoosScores {
    let subscale = |s: KoosSubscale| {
        let items: Vec<&Question> = questions
            .iter()
            .filter(|q| q.section.as_deref() == Some(s.id()))
            .collect();
        let values: Vec<f64> = items.iter().filter_map(|q| answers.number(&q.id)).collect();
        let max_per_item = items.iter().map(|q| q.max_value()).reduce(f64::max).unwrap_or(0.0);
        score_subscale(s, &values, items.len(), max_per_item)
    };

    KoosScores {
        symptoms: subscale(KoosSubscale::Symptoms),
        pain: subscale(KoosSubscale::Pain),
        adl: subscale(KoosSubscale::Adl),
        sport: subscale(KoosSubscale::Sport),
        qol: subscale(KoosSubscale::Qol),
    }
}

/// At least half of the items (rounded up) must be answered. The
/// denominator covers only the answered items, and the result is inverted
/// so that a raw 0 scores 100.
fn score_subscale(
    subscale: KoosSubscale,
    values: &[f64],
    item_count: usize,
    max_per_item: f64,
) -> SubscaleScore {
    let answered = values.len();
    if answered < item_count.div_ceil(2) || answered == 0 {
        tracing::debug!(
            subscale = subscale.id(),
            answered,
            item_count,
            "KOOS subscale incomplete"
        );
        return SubscaleScore {
            valid: false,
            sum: 0.0,
            answered,
            item_count,
            score: None,
        };
    }

    let sum: f64 = values.iter().sum();
    let denom = max_per_item * answered as f64;
    SubscaleScore {
        valid: true,
        sum,
        answered,
        item_count,
        score: Some(round_to_tenth(100.0 - sum * 100.0 / denom)),
    }
}

fn options() -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("Nunca / Ninguno / En absoluto", 0.0),
        AnswerOption::new("Rara vez / Leve / Ligeramente / Mensual", 1.0),
        AnswerOption::new("A veces / Moderado / Semanal", 2.0),
        AnswerOption::new("A menudo / Severo / Diario", 3.0),
        AnswerOption::new("Siempre / Extremo / Constante / Totalmente", 4.0),
    ]
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let items: [(&str, KoosSubscale, &str); 42] = [
        ("S1", KoosSubscale::Symptoms, "¿Tiene hinchazón en la rodilla?"),
        ("S2", KoosSubscale::Symptoms, "¿Crujido/chasquido o ruido al mover la rodilla?"),
        ("S3", KoosSubscale::Symptoms, "¿Se bloquea o se 'engancha' la rodilla al moverse?"),
        ("S4", KoosSubscale::Symptoms, "¿Puede enderezar completamente la rodilla?"),
        ("S5", KoosSubscale::Symptoms, "¿Puede doblar completamente la rodilla?"),
        ("S6", KoosSubscale::Symptoms, "Rigidez después de despertarse por la mañana."),
        ("S7", KoosSubscale::Symptoms, "Rigidez tras estar sentado/tumbado/descansando."),
        ("P1", KoosSubscale::Pain, "¿Con qué frecuencia experimenta dolor de rodilla?"),
        ("P2", KoosSubscale::Pain, "Dolor al girar o pivotar sobre su rodilla."),
        ("P3", KoosSubscale::Pain, "Dolor al enderezar completamente la rodilla."),
        ("P4", KoosSubscale::Pain, "Dolor al doblar completamente la rodilla."),
        ("P5", KoosSubscale::Pain, "Dolor al caminar sobre superficie plana."),
        ("P6", KoosSubscale::Pain, "Dolor al subir o bajar escaleras."),
        ("P7", KoosSubscale::Pain, "Dolor por la noche en la cama."),
        ("P8", KoosSubscale::Pain, "Dolor al estar sentado o acostado."),
        ("P9", KoosSubscale::Pain, "Dolor al estar de pie."),
        ("A1", KoosSubscale::Adl, "Bajar escaleras."),
        ("A2", KoosSubscale::Adl, "Subir escaleras."),
        ("A3", KoosSubscale::Adl, "Levantarse de una silla."),
        ("A4", KoosSubscale::Adl, "Estar de pie."),
        ("A5", KoosSubscale::Adl, "Agacharse hasta el suelo."),
        ("A6", KoosSubscale::Adl, "Caminar sobre superficie plana."),
        ("A7", KoosSubscale::Adl, "Entrar o salir de un coche."),
        ("A8", KoosSubscale::Adl, "Ir de compras."),
        ("A9", KoosSubscale::Adl, "Ponerse calcetines/medias."),
        ("A10", KoosSubscale::Adl, "Levantarse de la cama."),
        ("A11", KoosSubscale::Adl, "Quitarse calcetines/medias."),
        ("A12", KoosSubscale::Adl, "Estar acostado en la cama."),
        ("A13", KoosSubscale::Adl, "Entrar o salir de la ducha/bañera."),
        ("A14", KoosSubscale::Adl, "Estar sentado."),
        ("A15", KoosSubscale::Adl, "Sentarse/levantarse del inodoro."),
        ("A16", KoosSubscale::Adl, "Tareas domésticas pesadas."),
        ("A17", KoosSubscale::Adl, "Tareas domésticas ligeras."),
        ("SP1", KoosSubscale::Sport, "Ponerse en cuclillas."),
        ("SP2", KoosSubscale::Sport, "Correr."),
        ("SP3", KoosSubscale::Sport, "Saltar."),
        ("SP4", KoosSubscale::Sport, "Girar/pivotar sobre la rodilla lesionada."),
        ("SP5", KoosSubscale::Sport, "Arrodillarse."),
        ("Q1", KoosSubscale::Qol, "Frecuencia con la que es consciente del problema de rodilla."),
        ("Q2", KoosSubscale::Qol, "¿Ha modificado su estilo de vida por la rodilla?"),
        ("Q3", KoosSubscale::Qol, "Preocupación por falta de confianza en su rodilla."),
        ("Q4", KoosSubscale::Qol, "Dificultad general con su rodilla."),
    ];

    items
        .iter()
        .map(|(id, subscale, text)| Question::radio(*id, *text, options()).in_section(subscale.id()))
        .collect()
});
