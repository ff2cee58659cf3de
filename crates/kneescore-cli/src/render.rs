//! Text and JSON rendering for command output.

use eyre::Result;
use serde::Serialize;

use kneescore_core::models::question::QuestionKind;
use kneescore_instruments::Instrument;
use kneescore_instruments::banding::Interpretation;
use kneescore_instruments::instruments::ikdc::MIN_ANSWERED;
use kneescore_instruments::instruments::womac::WomacSection;
use kneescore_instruments::scoring::{AnswerIssue, ScoreResult};

use crate::config::OutputFormat;

pub fn json<T: Serialize + ?Sized>(value: &T, output: OutputFormat) -> Result<String> {
    let text = match output {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Text | OutputFormat::Json => serde_json::to_string(value)?,
    };
    Ok(text)
}

pub fn output_name(output: OutputFormat) -> &'static str {
    match output {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Pretty => "pretty",
    }
}

/// One block per question: id, text, then its answer domain.
pub fn questions(instrument: &dyn Instrument) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}, code {}): {} questions\n",
        instrument.name(),
        instrument.id(),
        instrument.kind().code(),
        instrument.questions().len()
    ));

    for q in instrument.questions() {
        let mut header = vec![q.id.clone()];
        if let Some(section) = &q.section {
            header.push(format!("[{section}]"));
        }
        if q.exclude_from_score {
            header.push("[not scored]".to_string());
        }
        out.push_str(&format!("\n{}\n", header.join(" ")));
        out.push_str(&format!("  {}\n", q.text));
        match &q.kind {
            QuestionKind::Radio { options } => {
                for option in options {
                    out.push_str(&format!("  {:>5}  {}\n", option.value, option.label));
                }
            }
            QuestionKind::Scale {
                min,
                max,
                min_label,
                max_label,
            } => {
                out.push_str(&format!("  scale {min}-{max}"));
                if let (Some(low), Some(high)) = (min_label, max_label) {
                    out.push_str(&format!(" ({low} .. {high})"));
                }
                out.push('\n');
            }
        }
    }
    out
}

fn band<'a>(interpretations: &'a [Interpretation], measure: &str) -> &'a str {
    interpretations
        .iter()
        .find(|i| i.measure == measure)
        .map(|i| i.band.label.as_str())
        .unwrap_or("")
}

pub fn score(
    name: &str,
    result: &ScoreResult,
    interpretations: &[Interpretation],
    issues: &[AnswerIssue],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{name}\n"));

    match result {
        ScoreResult::Ikdc(s) if s.valid => {
            out.push_str(&format!(
                "  Score: {} / 100 ({})\n",
                s.score,
                band(interpretations, "score")
            ));
            out.push_str(&format!("  Answered: {}/{}\n", s.answered, s.scorable));
        }
        ScoreResult::Ikdc(s) => {
            out.push_str(&format!(
                "  Not valid: {} of {} scorable items answered ({} required)\n",
                s.answered, s.scorable, MIN_ANSWERED
            ));
        }
        ScoreResult::Koos(s) => {
            for (subscale, sub) in s.subscales() {
                let title = subscale.title();
                let value = match sub.score {
                    Some(value) => format!("{value:.1}"),
                    None => "incomplete".to_string(),
                };
                out.push_str(&format!(
                    "  {title}: {value} ({}/{})\n",
                    sub.answered, sub.item_count
                ));
            }
        }
        ScoreResult::Womac(s) => {
            let rows = [
                (WomacSection::Pain.title(), "pain", s.raw.pain, s.max.pain, s.normalized.pain),
                (
                    WomacSection::Stiffness.title(),
                    "stiffness",
                    s.raw.stiffness,
                    s.max.stiffness,
                    s.normalized.stiffness,
                ),
                (
                    WomacSection::Function.title(),
                    "function",
                    s.raw.function,
                    s.max.function,
                    s.normalized.function,
                ),
                ("Total", "total", s.raw.total, s.max.total, s.normalized.total),
            ];
            for (title, measure, raw, max, pct) in rows {
                out.push_str(&format!(
                    "  {title}: {raw}/{max} = {pct}% ({})\n",
                    band(interpretations, measure)
                ));
            }
            out.push_str(&format!("  Answered: {}/{}\n", s.answered, s.max_answered));
        }
        ScoreResult::LysholmTegner(s) => {
            out.push_str(&format!(
                "  Lysholm: {}/{} ({})\n",
                s.lysholm.score,
                s.lysholm.max,
                band(interpretations, "lysholm")
            ));
            let tegner = match s.tegner.value {
                Some(_) if !s.tegner.label.is_empty() => s.tegner.label.clone(),
                Some(value) => value.to_string(),
                None => "not answered".to_string(),
            };
            out.push_str(&format!("  Tegner: {tegner}\n"));
        }
        ScoreResult::Iks(s) => {
            out.push_str(&format!(
                "  Knee score: {} (pain + mobility {} + stability {} = {}, deductions {})\n",
                s.knee_score, s.mobility_pts, s.stability_pts, s.knee_positive, s.knee_deductions
            ));
            out.push_str(&format!(
                "  Function score: {} (raw {})\n",
                s.function_score, s.function_raw
            ));
            if !s.inputs_missing.is_empty() {
                out.push_str(&format!("  Missing: {}\n", s.inputs_missing.join(", ")));
            }
        }
    }

    for issue in issues {
        out.push_str(&format!("  warning: {issue}\n"));
    }
    out
}
