//! kneescore: score patient-reported knee questionnaires from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use config::{KneescoreConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "kneescore", version, about = "Score patient-reported knee questionnaires")]
struct Cli {
    /// Config file path (default: <config dir>/kneescore/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format; overrides KNEESCORE_OUTPUT and the config file
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available instruments
    List,

    /// Show an instrument's questions and answer options
    Show {
        /// Instrument id or code (e.g. "koos", "LYSHOLM-TEGNER")
        instrument: String,
    },

    /// Score a set of answers
    Score {
        /// Instrument id or code
        instrument: String,

        /// JSON answers file, or "-" for stdin
        #[arg(long, default_value = "-")]
        answers: PathBuf,

        /// Print the submission envelope for this owner instead of the scores
        #[arg(long)]
        owner: Option<String>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };

    // `config init` must work where no readable config exists yet.
    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = &cli.command
    {
        init_tracing(&KneescoreConfig::default().log_filter, cli.log_json);
        return commands::config::init(&config_path, *force);
    }

    let loaded = config::load_config(&config_path, cli.config.is_some())?;
    init_tracing(
        &loaded.config.log_filter,
        cli.log_json || loaded.config.log_json,
    );
    if let Some(from) = loaded.migrated_from {
        tracing::info!(
            from,
            to = config::CURRENT_VERSION,
            path = %config_path.display(),
            "migrated config"
        );
    }

    let output = match cli.output {
        Some(output) => output,
        None => config::output_from_env()?.unwrap_or(loaded.config.output),
    };

    match cli.command {
        Commands::List => commands::list::execute(output),
        Commands::Show { instrument } => commands::show::execute(&instrument, output),
        Commands::Score {
            instrument,
            answers,
            owner,
        } => commands::score::execute(&instrument, &answers, owner.as_deref(), output),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&loaded.config, &config_path, output),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
