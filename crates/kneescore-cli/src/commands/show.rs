//! The `kneescore show` command.

use eyre::Result;

use kneescore_instruments::error::InstrumentError;
use kneescore_instruments::get_instrument;

use crate::config::OutputFormat;
use crate::render;

pub fn execute(instrument_id: &str, output: OutputFormat) -> Result<()> {
    let instrument = get_instrument(instrument_id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(instrument_id.to_string()))?;

    match output {
        OutputFormat::Text => print!("{}", render::questions(instrument.as_ref())),
        OutputFormat::Json | OutputFormat::Pretty => {
            println!("{}", render::json(&instrument.questions(), output)?);
        }
    }
    Ok(())
}
