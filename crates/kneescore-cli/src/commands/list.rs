//! The `kneescore list` command.

use eyre::Result;
use serde::Serialize;

use kneescore_instruments::all_instruments;

use crate::config::OutputFormat;
use crate::render;

#[derive(Serialize)]
struct InstrumentSummary {
    id: String,
    code: &'static str,
    name: String,
    questions: usize,
}

pub fn execute(output: OutputFormat) -> Result<()> {
    let summaries: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            code: i.kind().code(),
            name: i.name().to_string(),
            questions: i.questions().len(),
        })
        .collect();

    match output {
        OutputFormat::Text => {
            for s in &summaries {
                println!(
                    "{:<16} {:<16} {:<18} {} questions",
                    s.id, s.code, s.name, s.questions
                );
            }
        }
        OutputFormat::Json | OutputFormat::Pretty => {
            println!("{}", render::json(&summaries, output)?);
        }
    }
    Ok(())
}
