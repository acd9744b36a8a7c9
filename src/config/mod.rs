use self::builder::BuilderConfig;
use crate::error::BuilderError;
use std::fs;

pub mod builder;
pub mod creator;

pub fn load_config(path: &str) -> Result<BuilderConfig, BuilderError> {
    let content = fs::read_to_string(path)?;
    let config: BuilderConfig = toml::from_str(&content)?;
    config
        .validate()
        .map_err(|e| BuilderError::ValidationError(e.to_string()))?;
    Ok(config)
}
