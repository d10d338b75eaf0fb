use crate::domains::logger::LogLevel;
use crate::domains::netlogo::DEFAULT_SENTINEL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: PathBuf,
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Directory descriptions are read from; falls back to `BEACON_NET_DATA_DIR`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Optional report file, written through fast_log.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources/template.nlogo"),
            sentinel: default_sentinel(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("map.nlogo") }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            description: "network.toml".to_string(),
        }
    }
}
