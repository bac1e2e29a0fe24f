use crate::error::ConfigError;
use crate::protocol::DEFAULT_LOCUS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub protocol: ProtocolConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        let vpp_dir = directories::UserDirs::new()
            .map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf())
            .join(".vpp");
        Self {
            workspace_dir: vpp_dir.join("workspace"),
            config_path: vpp_dir.join("config.toml"),
            protocol: ProtocolConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.max_level()?;
        Ok(())
    }

    /// Where the protocol state snapshot lives.
    pub fn state_path(&self) -> PathBuf {
        self.workspace_dir.join("session.json")
    }
}

/// Seed values the surrounding application hands to a fresh runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    #[serde(default = "default_locus")]
    pub locus: Option<String>,
    #[serde(default)]
    pub assumptions: i64,
}

fn default_locus() -> Option<String> {
    Some(DEFAULT_LOCUS.to_string())
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            locus: default_locus(),
            assumptions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.level
            .trim()
            .parse::<Level>()
            .map_err(|_| ConfigError::Validation(format!("unknown log level: {}", self.level)))
    }
}
