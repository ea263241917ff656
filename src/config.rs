//! Site configuration.
//!
//! Loaded from an optional `archivador.toml` next to where the tool runs:
//!
//! ```toml
//! # All options are optional - defaults shown below
//! title = "Archivo"        # Site title shown on every page
//! db = "archivo.db"        # Path to the SQLite database
//! output = "output"        # Directory the rendered site is written to
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early. CLI flags override file values.
//!
//! The override switch lives in the environment rather than the file, so a
//! one-off full re-render (`OVERRIDE_ALL=1 archivador render`) never needs
//! a config edit.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable forcing re-render of existing document pages.
pub const OVERRIDE_ENV: &str = "OVERRIDE_ALL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site configuration with defaults for every field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown on every page.
    pub title: String,
    /// Path to the SQLite database.
    pub db: PathBuf,
    /// Directory the rendered site is written to.
    pub output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Archivo".to_string(),
            db: PathBuf::from("archivo.db"),
            output: PathBuf::from("output"),
        }
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// doesn't exist. A file that exists but fails to parse is an error, not a
/// silent fallback.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Whether the environment requests re-rendering of existing pages.
///
/// Any non-empty value counts; an empty `OVERRIDE_ALL=` does not.
pub fn override_from_env() -> bool {
    std::env::var(OVERRIDE_ENV)
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("archivador.toml")).unwrap();
        assert_eq!(config.title, "Archivo");
        assert_eq!(config.db, PathBuf::from("archivo.db"));
        assert_eq!(config.output, PathBuf::from("output"));
    }

    #[test]
    fn sparse_file_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("archivador.toml");
        fs::write(&path, "title = \"Archivo Histórico\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.title, "Archivo Histórico");
        assert_eq!(config.db, PathBuf::from("archivo.db"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("archivador.toml");
        fs::write(&path, "tittle = \"typo\"\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("archivador.toml");
        fs::write(&path, "title = ").unwrap();

        assert!(load_config(&path).is_err());
    }
}
