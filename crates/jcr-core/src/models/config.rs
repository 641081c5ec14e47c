//! Configuration structures for report generation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the jcr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JcrConfig {
    /// Document counter configuration.
    pub counter: CounterConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Template configuration.
    pub template: TemplateConfig,
}

/// Persisted monthly counter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Path of the JSON counter file.
    pub path: PathBuf,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("counter.json"),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving rendered documents and the summary.
    pub dir: PathBuf,

    /// Prefix for rendered document file names.
    pub file_prefix: String,

    /// File name of the CSV summary.
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            file_prefix: "JCR_".to_string(),
            summary_file: "summary.csv".to_string(),
        }
    }
}

/// Template configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Default DOCX template, used when none is given on the command line.
    pub path: Option<PathBuf>,
}

impl JcrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Full path of the summary file inside the output directory.
    pub fn summary_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.summary_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: JcrConfig =
            serde_json::from_str(r#"{"counter": {"path": "/tmp/c.json"}}"#).unwrap();

        assert_eq!(config.counter.path, PathBuf::from("/tmp/c.json"));
        assert_eq!(config.output.file_prefix, "JCR_");
        assert_eq!(config.summary_path(), PathBuf::from("output/summary.csv"));
        assert!(config.template.path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = JcrConfig::default();
        config.output.file_prefix = "WO_".to_string();
        config.save(&path).unwrap();

        let loaded = JcrConfig::from_file(&path).unwrap();
        assert_eq!(loaded.output.file_prefix, "WO_");
    }
}
