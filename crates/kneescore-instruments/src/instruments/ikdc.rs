use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_core::models::question::{AnswerOption, Question};

use crate::scoring::{round_half_up, ScoreResult};
use crate::Instrument;

/// Scorable items that must be answered for a valid score. An absolute
/// floor (16 of the 18 scorable items), not a percentage of the schema.
pub const MIN_ANSWERED: usize = 16;

/// IKDC Subjective Knee Evaluation Form.
/// 18 scorable items plus a pre-injury baseline that is collected but not
/// scored. Score = sum / max possible × 100.
pub struct Ikdc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IkdcScore {
    pub valid: bool,
    /// 0–100, rounded. 0 when invalid.
    pub score: f64,
    /// Σ max over every scorable item, answered or not. 0 when invalid.
    pub max_possible: f64,
    pub answered: usize,
    pub scorable: usize,
}

impl Instrument for Ikdc {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Ikdc
    }

    fn name(&self) -> &str {
        "IKDC"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerSet) -> ScoreResult {
        ScoreResult::Ikdc(compute_ikdc_score(answers, self.questions()))
    }
}

pub fn compute_ikdc_score(answers: &AnswerSet, questions: &[Question]) -> IkdcScore {
    let scorable: Vec<&Question> = questions.iter().filter(|q| q.is_scorable()).collect();
    let answered: Vec<f64> = scorable.iter().filter_map(|q| answers.number(&q.id)).collect();

    if answered.len() < MIN_ANSWERED {
        tracing::debug!(
            answered = answered.len(),
            required = MIN_ANSWERED,
            "IKDC below completeness floor"
        );
        return IkdcScore {
            valid: false,
            score: 0.0,
            max_possible: 0.0,
            answered: answered.len(),
            scorable: scorable.len(),
        };
    }

    let sum: f64 = answered.iter().sum();
    let max_possible: f64 = scorable.iter().map(|q| q.max_value()).sum();
    let score = if max_possible > 0.0 {
        round_half_up(sum / max_possible * 100.0)
    } else {
        0.0
    };

    IkdcScore {
        valid: true,
        score,
        max_possible,
        answered: answered.len(),
        scorable: scorable.len(),
    }
}

/// Activity levels, best first. Each question authors its own wording.
fn activity_levels(labels: [&str; 5]) -> Vec<AnswerOption> {
    labels
        .into_iter()
        .zip([4.0, 3.0, 2.0, 1.0, 0.0])
        .map(|(label, value)| AnswerOption::new(label, value))
        .collect()
}

const SHORT_ACTIVITY_LABELS: [&str; 5] = [
    "Actividades muy agotadoras (saltar/girar…)",
    "Actividades agotadoras (trabajo físico pesado…)",
    "Actividades moderadas (correr/jogging…)",
    "Actividades ligeras (caminar, tareas en casa…)",
    "No puedo realizar ninguna de las anteriores",
];

fn difficulty_levels() -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("Ninguna dificultad", 4.0),
        AnswerOption::new("Dificultad mínima", 3.0),
        AnswerOption::new("Dificultad moderada", 2.0),
        AnswerOption::new("Sumamente difícil", 1.0),
        AnswerOption::new("No puedo hacerlo", 0.0),
    ]
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let mut questions = vec![
        Question::radio(
            "q1_activity_without_pain",
            "¿Cuál es el nivel más alto de actividad que puede realizar sin sentir dolor en la rodilla?",
            activity_levels([
                "Actividades muy agotadoras (saltar/girar, básquet/fútbol)",
                "Actividades agotadoras (trabajo físico pesado, esquiar/tenis)",
                "Actividades moderadas (correr/jogging, trabajo moderado)",
                "Actividades ligeras (caminar, tareas en casa/jardín)",
                "No puedo realizar ninguna de las anteriores por dolor",
            ]),
        ),
        Question::scale(
            "q2_pain_frequency",
            "Durante las últimas 4 semanas o desde la lesión, ¿con cuánta frecuencia ha tenido dolor?",
            0.0,
            10.0,
        )
        .with_scale_labels("Constantemente (0)", "Nunca (10)"),
        Question::scale(
            "q3_pain_intensity",
            "Marque la intensidad del dolor",
            0.0,
            10.0,
        )
        .with_scale_labels("Peor dolor (0)", "Ningún dolor (10)"),
        Question::radio(
            "q4_stiffness_swelling",
            "Durante las últimas 4 semanas, ¿qué tan rígida o hinchada estuvo su rodilla?",
            vec![
                AnswerOption::new("Nada", 4.0),
                AnswerOption::new("Poco", 3.0),
                AnswerOption::new("Moderadamente", 2.0),
                AnswerOption::new("Mucho", 1.0),
                AnswerOption::new("Muchísimo", 0.0),
            ],
        ),
        Question::radio(
            "q5_activity_without_swelling",
            "¿Cuál es el nivel más alto de actividad que puede realizar sin que la rodilla se hinche de forma considerable?",
            activity_levels(SHORT_ACTIVITY_LABELS),
        ),
        Question::radio(
            "q6_locking",
            "Durante las últimas 4 semanas, ¿se le ha bloqueado/trabado temporalmente la rodilla?",
            vec![AnswerOption::new("Sí", 0.0), AnswerOption::new("No", 1.0)],
        ),
        Question::radio(
            "q7_activity_without_giving_way",
            "¿Cuál es el nivel más alto de actividad que puede hacer sin que la rodilla le falle?",
            activity_levels(SHORT_ACTIVITY_LABELS),
        ),
        Question::radio(
            "q8_highest_regular_activity",
            "¿Cuál es el nivel más alto de actividad que puede efectuar de forma habitual?",
            activity_levels([
                "Actividades muy agotadoras",
                "Actividades agotadoras",
                "Actividades moderadas",
                "Actividades ligeras",
                "No puedo realizar ninguna de las anteriores",
            ]),
        ),
    ];

    let tasks = [
        ("q9a_stairs_up", "Subir escaleras"),
        ("q9b_stairs_down", "Bajar escaleras"),
        ("q9c_kneeling", "Arrodillarse sobre la parte delantera de la rodilla"),
        ("q9d_squatting", "Ponerse en cuclillas"),
        ("q9e_sitting_bent", "Sentarse con la rodilla doblada"),
        ("q9f_stand_from_chair", "Levantarse de una silla"),
        ("q9g_run_straight", "Correr hacia delante en línea recta"),
        ("q9h_jump_land", "Saltar y caer sobre la pierna afectada"),
        ("q9i_stop_start", "Parar y comenzar rápidamente a caminar o correr"),
    ];
    questions.extend(tasks.iter().map(|(id, task)| {
        Question::radio(
            *id,
            format!("Debido a su rodilla, nivel de dificultad para: {task}"),
            difficulty_levels(),
        )
    }));

    questions.push(
        Question::scale(
            "q10a_function_pre_injury",
            "Funcionamiento de su rodilla ANTES de la lesión",
            0.0,
            10.0,
        )
        .with_scale_labels("0 (nulo)", "10 (óptimo)")
        .excluded_from_score(),
    );
    questions.push(
        Question::scale(
            "q10b_function_current",
            "Funcionamiento ACTUAL de su rodilla",
            0.0,
            10.0,
        )
        .with_scale_labels("0 (nulo)", "10 (óptimo)"),
    );

    questions
});
