//! Configuration management and loading for sortscope.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sortscope_logging::LoggingConfig;
use std::path::Path;

/// Configuration format types supported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// Detect format from extension; anything unknown is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Main sortscope configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortscopeConfig {
    /// Capacity of both fixed-size arrays
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Number of random values to generate
    #[serde(default = "default_count")]
    pub count: usize,

    /// Exclusive upper bound for generated values
    #[serde(default = "default_max_value")]
    pub max_value: i64,

    /// How many leading values of the unsorted array go into the tree
    #[serde(default = "default_bst_sample")]
    pub bst_sample: usize,

    /// Values per line when listing container contents
    #[serde(default = "default_row_width")]
    pub row_width: usize,

    /// Fixed RNG seed; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_capacity() -> usize {
    512
}

fn default_count() -> usize {
    512
}

fn default_max_value() -> i64 {
    1000
}

fn default_bst_sample() -> usize {
    20
}

fn default_row_width() -> usize {
    20
}

impl Default for SortscopeConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            count: default_count(),
            max_value: default_max_value(),
            bst_sample: default_bst_sample(),
            row_width: default_row_width(),
            seed: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl SortscopeConfig {
    /// Rejects settings the workbench cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_value <= 0 {
            anyhow::bail!("max_value must be positive, got {}", self.max_value);
        }
        if self.row_width == 0 {
            anyhow::bail!("row_width must be at least 1");
        }
        Ok(())
    }
}

/// Load configuration from a file
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<SortscopeConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let config: SortscopeConfig = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e))?,
        ConfigFormat::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse YAML config: {}", e))?,
    };
    config.validate()?;
    Ok(config)
}

/// Save configuration to a file
pub fn save_config<P: AsRef<Path>>(config: &SortscopeConfig, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let contents = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON config: {}", e))?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize YAML config: {}", e))?,
    };

    std::fs::write(path, contents).with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}
