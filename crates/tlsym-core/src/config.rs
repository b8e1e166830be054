use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithm::Algorithm;
use crate::error::TlsymResult;

/// Top-level configuration (loaded from tlsym.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsymConfig {
    pub cipher: CipherConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// Algorithm used when the command line does not name one (default: aes-256-gcm)
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl TlsymConfig {
    pub fn from_toml_str(s: &str) -> TlsymResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> TlsymResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> TlsymResult<Self> {
        if !path.exists() {
            tracing::warn!(
                "config file not found: {}  (using defaults)",
                path.display()
            );
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
