//! The `kneescore score` command.

use std::io::Read;
use std::path::Path;

use eyre::{Result, WrapErr};
use serde::Serialize;

use kneescore_core::normalize::RawAnswers;
use kneescore_instruments::banding::Interpretation;
use kneescore_instruments::error::InstrumentError;
use kneescore_instruments::scoring::{AnswerIssue, ScoreResult};
use kneescore_instruments::{compute_score, get_instrument, prepare_submission};

use crate::config::OutputFormat;
use crate::render;

#[derive(Serialize)]
struct ScoreReport<'a> {
    valid: bool,
    result: &'a ScoreResult,
    interpretations: Vec<Interpretation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<AnswerIssue>,
}

pub fn execute(
    instrument_id: &str,
    answers_path: &Path,
    owner: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    // Resolved before stdin is read so a typo fails fast.
    let instrument = get_instrument(instrument_id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(instrument_id.to_string()))?;

    let text = read_input(answers_path)?;
    let answers = RawAnswers::parse_record(&text)
        .wrap_err_with(|| format!("answers in {} are not valid JSON", answers_path.display()))?
        .normalize();

    let issues = instrument.check_answers(&answers);
    for issue in &issues {
        tracing::warn!(
            question = %issue.question_id,
            value = issue.value,
            "answer outside question domain"
        );
    }

    let result = compute_score(instrument.id(), &answers)?;

    if let Some(owner) = owner {
        let submission = prepare_submission(owner, &answers, &result).ok_or_else(|| {
            eyre::eyre!(
                "{} result is not valid ({} answered); nothing to submit",
                instrument.name(),
                result.answered()
            )
        })?;
        // The envelope is a wire payload, so text output prints it as JSON too.
        let format = match output {
            OutputFormat::Text => OutputFormat::Json,
            other => other,
        };
        println!("{}", render::json(&submission, format)?);
        return Ok(());
    }

    let report = ScoreReport {
        valid: result.is_valid(),
        result: &result,
        interpretations: result.interpretations(),
        issues,
    };
    match output {
        OutputFormat::Text => print!(
            "{}",
            render::score(instrument.name(), report.result, &report.interpretations, &report.issues)
        ),
        OutputFormat::Json | OutputFormat::Pretty => println!("{}", render::json(&report, output)?),
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .wrap_err("failed to read answers from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read answers from {}", path.display()))
}
