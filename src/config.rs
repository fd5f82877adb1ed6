//! Dashboard configuration file support.
//!
//! Settings are read from `launch-dash.toml` in the working directory when it
//! exists; every field is optional and falls back to the defaults below.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "launch-dash.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Launch table loaded once at startup.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Page / window heading.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("spacex_launch_dash.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_title() -> String {
    "SpaceX Launch Records Dashboard".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            host: default_host(),
            port: default_port(),
            title: default_title(),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if it exists, otherwise use the defaults. A file that
    /// exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::info!("Reading configuration from {}", path.display());
            Self::load(path)
        } else {
            log::debug!("{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Socket address the HTTP dashboard listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_dash_conventions() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(cfg.bind_addr().unwrap(), "127.0.0.1:8050".parse().unwrap());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = DashboardConfig::from_toml_str("port = 9000\ndata_path = \"launches.parquet\"\n")
            .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_path, PathBuf::from("launches.parquet"));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.title, "SpaceX Launch Records Dashboard");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(matches!(
            DashboardConfig::load_or_default(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn bad_host_is_reported() {
        let cfg = DashboardConfig {
            host: "not a host".into(),
            ..DashboardConfig::default()
        };
        assert!(matches!(cfg.bind_addr(), Err(ConfigError::InvalidAddress(_))));
    }
}
