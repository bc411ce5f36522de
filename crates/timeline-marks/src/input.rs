// crates/timeline-marks/src/input.rs

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use timeline_marks_core::{TimelineConfig, TimelineInput};
use tracing::debug;

pub const CONFIG_ENV: &str = "TIMELINE_MARKS_CONFIG";

pub fn config_path_from_env() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV).map(PathBuf::from)
}

/// Reads an input document, replacing its `config` with the TOML file when one is given.
pub fn load(document_path: &Path, config_path: Option<&Path>) -> Result<TimelineInput> {
    let content = fs::read_to_string(document_path)
        .with_context(|| format!("failed to read {}", document_path.display()))?;
    let mut document = TimelineInput::from_json_str(&content)
        .with_context(|| format!("{} is not a valid input document", document_path.display()))?;

    if let Some(path) = config_path {
        debug!(path = %path.display(), "Loading configuration override");
        document.config = load_config(path)?;
    }

    Ok(document)
}

pub fn load_config(path: &Path) -> Result<TimelineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    TimelineConfig::from_toml_str(&content)
        .with_context(|| format!("{} is not a valid configuration", path.display()))
}
