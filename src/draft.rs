//! Local TOML drafts of strategy documents.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuilderError;
use crate::strategy::Strategy;

pub fn load_draft(path: impl AsRef<Path>) -> Result<Strategy, BuilderError> {
    let content = fs::read_to_string(path.as_ref())?;
    let strategy: Strategy = toml::from_str(&content)?;
    strategy.validate()?;
    Ok(strategy)
}

pub fn save_draft(strategy: &Strategy, path: impl AsRef<Path>) -> Result<PathBuf, BuilderError> {
    let path = path.as_ref();
    let toml_string = toml::to_string_pretty(strategy)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml_string)?;
    info!("Draft '{}' written to {}", strategy.name, path.display());
    Ok(path.to_path_buf())
}

/// File name for a draft of `strategy`, e.g. `my_strategy.toml`.
pub fn default_draft_filename(strategy: &Strategy) -> String {
    let stem: String = strategy
        .name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "strategy.toml".to_string()
    } else {
        format!("{}.toml", stem)
    }
}
