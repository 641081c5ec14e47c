//! Subcommand implementations.

pub mod config;
pub mod counter;
pub mod extract;
pub mod generate;

use std::path::{Path, PathBuf};

use jcr_core::models::config::JcrConfig;
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jcr")
        .join("config.json")
}

/// Load the configuration from `config_path`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<JcrConfig> {
    if let Some(path) = config_path {
        return Ok(JcrConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(JcrConfig::from_file(&default_path)?)
    } else {
        Ok(JcrConfig::default())
    }
}
