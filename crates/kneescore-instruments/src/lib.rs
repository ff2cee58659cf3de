//! kneescore-instruments
//!
//! Knee questionnaire definitions and their scoring. Pure data and
//! arithmetic with no I/O. Each instrument owns its question registry,
//! its scoring formula and any interpretation bands.

pub mod banding;
pub mod error;
pub mod instruments;
pub mod scoring;

use kneescore_core::models::answer::AnswerSet;
use kneescore_core::models::instrument::InstrumentKind;
use kneescore_core::models::question::Question;
use kneescore_core::models::submission::Submission;

use error::InstrumentError;
use scoring::{AnswerIssue, ScoreResult};

/// Trait implemented by each knee questionnaire.
pub trait Instrument: Send + Sync {
    fn kind(&self) -> InstrumentKind;

    /// Registry identifier (e.g. "ikdc", "lysholm_tegner").
    fn id(&self) -> &str {
        self.kind().id()
    }

    /// Human-readable name (e.g. "IKDC", "IKS / KSS").
    fn name(&self) -> &str;

    /// The ordered question list. Read-only; the single source of truth
    /// for answer domains and attainable maxima.
    fn questions(&self) -> &[Question];

    /// Score an answer set. Never fails: incomplete input shows up as an
    /// invalid or partial result.
    fn score(&self, answers: &AnswerSet) -> ScoreResult;

    fn question(&self, id: &str) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// Numeric answers outside their question's domain. Answers to unknown
    /// ids and non-numeric answers are not checked. Scoring does not depend
    /// on this; it is for callers that want to warn before scoring.
    fn check_answers(&self, answers: &AnswerSet) -> Vec<AnswerIssue> {
        let mut issues = Vec::new();
        for (id, value) in answers.iter() {
            if let Some(question) = self.question(id)
                && let Some(number) = value.as_number()
                && !question.accepts(number)
            {
                issues.push(AnswerIssue {
                    question_id: id.to_string(),
                    value: number,
                    message: format!(
                        "{}: answer {} to '{}' is outside [{}, {}]",
                        self.name(),
                        number,
                        id,
                        question.min_value(),
                        question.max_value(),
                    ),
                });
            }
        }
        issues
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::ikdc::Ikdc),
        Box::new(instruments::koos::Koos),
        Box::new(instruments::womac::Womac),
        Box::new(instruments::lysholm_tegner::LysholmTegner),
        Box::new(instruments::iks::Iks),
    ]
}

/// Look up an instrument by registry id or backend code.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    let kind: InstrumentKind = id.parse().ok()?;
    all_instruments().into_iter().find(|i| i.kind() == kind)
}

/// Score `answers` with the instrument named by `id`.
pub fn compute_score(id: &str, answers: &AnswerSet) -> Result<ScoreResult, InstrumentError> {
    let instrument =
        get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))?;
    let result = instrument.score(answers);
    tracing::debug!(
        instrument = instrument.id(),
        valid = result.is_valid(),
        answered = result.answered(),
        "scored answer set"
    );
    Ok(result)
}

/// Wrap answers for the backend, but only once they score as valid.
pub fn prepare_submission(
    owner_id: &str,
    answers: &AnswerSet,
    result: &ScoreResult,
) -> Option<Submission> {
    if !result.is_valid() {
        return None;
    }
    Some(Submission::new(owner_id, result.kind(), answers.clone()))
}
