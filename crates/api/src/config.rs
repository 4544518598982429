//! API server configuration
//!
//! Loaded from an optional TOML file; every field has a default so a
//! missing file just means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine data directory")]
    NoDataDir,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Port to bind on
    pub port: u16,
    /// Database file path; defaults to the platform data directory
    pub db_path: Option<PathBuf>,
    /// Origins allowed by CORS (the frontend dev servers)
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            db_path: None,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:5174".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// no path is given or the file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)?;
                let config = toml::from_str(&raw)?;
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Some(path) => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve the database path, creating the parent directory if needed
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.db_path {
            Some(path) => path.clone(),
            None => {
                let dirs = ProjectDirs::from("app", "rhythmpulse", "rhythmpulse")
                    .ok_or(ConfigError::NoDataDir)?;
                dirs.data_dir().join("rhythmpulse.db")
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_path() {
        let config = ApiConfig::load(None).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ApiConfig::load(Some(Path::new("/nonexistent/rp.toml"))).unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rp.toml");
        std::fs::write(&path, "port = 8080\n").unwrap();

        let config = ApiConfig::load(Some(&path)).unwrap();
        assert_eq!(config.port, 8080);
        // Untouched fields keep their defaults
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_explicit_db_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("rp.db");

        let config = ApiConfig {
            db_path: Some(db_path.clone()),
            ..Default::default()
        };

        assert_eq!(config.database_path().unwrap(), db_path);
        // Parent directory was created
        assert!(db_path.parent().unwrap().exists());
    }
}
