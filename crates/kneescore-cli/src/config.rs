use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Overrides the configured output format.
pub const OUTPUT_ENV: &str = "KNEESCORE_OUTPUT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Compact JSON, one document per command
    Json,
    /// Indented JSON
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KneescoreConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub output: OutputFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub log_json: bool,
}

impl Default for KneescoreConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            output: OutputFormat::default(),
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// A config as read from disk, plus the version it was migrated from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: KneescoreConfig,
    pub migrated_from: Option<u32>,
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("kneescore").join("config.json"))
}

/// Load the config at `path`. A missing file yields the defaults unless
/// the caller named the path explicitly.
pub fn load_config(path: &Path, explicit: bool) -> eyre::Result<LoadedConfig> {
    if !path.exists() {
        if explicit {
            return Err(eyre::eyre!("config file not found: {}", path.display()));
        }
        return Ok(LoadedConfig {
            config: KneescoreConfig::default(),
            migrated_from: None,
        });
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(version) => u32::try_from(version).map_err(|_| newer_version_error(version))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: KneescoreConfig = serde_json::from_value(migrated)?;
    Ok(LoadedConfig {
        config,
        migrated_from: (on_disk_version < CURRENT_VERSION).then_some(on_disk_version),
    })
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(newer_version_error(u64::from(from_version)));
    }

    // v0 → v1: `format` renamed to `output`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(format) = obj.remove("format") {
            obj.entry("output").or_insert(format);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}

fn newer_version_error(version: u64) -> eyre::Report {
    eyre::eyre!(
        "config_version {version} is newer than this build supports ({CURRENT_VERSION}). \
         Please update kneescore."
    )
}

pub fn save_config(config: &KneescoreConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// The output format named by [`OUTPUT_ENV`], if set.
pub fn output_from_env() -> eyre::Result<Option<OutputFormat>> {
    match std::env::var(OUTPUT_ENV) {
        Ok(value) if !value.trim().is_empty() => OutputFormat::from_str(value.trim(), true)
            .map(Some)
            .map_err(|e| eyre::eyre!("invalid {OUTPUT_ENV}: {e}")),
        _ => Ok(None),
    }
}
