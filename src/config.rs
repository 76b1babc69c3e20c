//! Configuration file support for llm-adapter
//!
//! Loads settings from `llm-adapter.toml` (or `$LLM_ADAPTER_CONFIG`).
//! CLI arguments override config file values. Adapter definitions are
//! compiled in and cannot be changed from here.

use crate::api::StopPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "LLM_ADAPTER_CONFIG";
const CONFIG_FILE: &str = "llm-adapter.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub stop_policy: StopPolicy,
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load config from default locations, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = match std::env::var(CONFIG_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => Self::find_config_file(),
        };

        match config_path {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Find config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut candidates: Vec<PathBuf> = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs_config() {
            candidates.push(dir.join(CONFIG_FILE));
        }
        candidates.into_iter().find(|c| c.exists())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Generate a default config file content
    pub fn default_toml() -> String {
        r#"# llm-adapter configuration file

[logging]
# EnvFilter directive; RUST_LOG takes precedence when set
filter = "warn"
json = false

[render]
# "merge": request stops first, then the adapter's, de-duplicated
# "caller-only": adapter stops apply only when the request has none
stop_policy = "merge"
# "text" or "json"
output = "text"
"#
        .to_string()
    }
}

/// Get platform config directory
fn dirs_config() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config").join("llm-adapter"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(|d| PathBuf::from(d).join("llm-adapter"))
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config").join("llm-adapter"))
            })
    }
}
