//! The `kneescore config` commands.

use std::path::Path;

use eyre::Result;

use crate::config::{self, KneescoreConfig, OutputFormat};
use crate::render;

pub fn show(config: &KneescoreConfig, path: &Path, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => {
            println!("path:       {}", path.display());
            println!("output:     {}", render::output_name(config.output));
            println!("log_filter: {}", config.log_filter);
            println!("log_json:   {}", config.log_json);
        }
        OutputFormat::Json | OutputFormat::Pretty => println!("{}", render::json(config, output)?),
    }
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    config::save_config(&KneescoreConfig::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
