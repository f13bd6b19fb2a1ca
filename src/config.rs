//! Configuration loading with env-var overrides.
//!
//! Settings come from built-in defaults, an optional TOML file, and then the
//! `LENDING_LOG_LEVEL` / `LENDING_HISTORY_LIMIT` environment variables.
//! Command-line flags are applied last by the binary.

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "LENDING_LOG_LEVEL";

/// Environment variable overriding the default history length
pub const HISTORY_LIMIT_ENV: &str = "LENDING_HISTORY_LIMIT";

/// Settings for an interactive catalog session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Tracing filter directive, e.g. `info` or `lending_catalog=debug`
    pub log_level: String,
    /// Number of transactions shown when no count is entered
    pub history_limit: usize,
    /// Whether to stock the catalog with sample items at startup
    pub seed_samples: bool,
    /// Render listings, history and statistics as JSON
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), history_limit: 5, seed_samples: true, json: false }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the document is not valid TOML or has
    /// unknown keys or wrongly typed values.
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and
    /// `AppError::Config` if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if an override cannot be parsed.
    pub fn apply_env(self) -> Result<Self, AppError> {
        self.apply_env_with(|key| env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `LENDING_HISTORY_LIMIT` is not a
    /// non-negative integer.
    pub fn apply_env_with(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|level| !level.trim().is_empty()) {
            self.log_level = level;
        }
        if let Some(limit) = lookup(HISTORY_LIMIT_ENV) {
            self.history_limit = limit.trim().parse().map_err(|e| {
                AppError::Config(format!("invalid {HISTORY_LIMIT_ENV} '{limit}': {e}"))
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// Lookup backed by a fixed list of pairs
    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let owned: Vec<(String, String)> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key: &str| owned.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.history_limit, 5);
        assert!(config.seed_samples);
        assert!(!config.json);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("history_limit = 12\njson = true\n");
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert_eq!(config.history_limit, 12);
            assert!(config.json);
            assert_eq!(config.log_level, "info");
            assert!(config.seed_samples);
        }
    }

    #[test]
    fn unknown_or_mistyped_keys_are_rejected() {
        assert!(matches!(AppConfig::from_toml_str("colour = true"), Err(AppError::Config(_))));
        assert!(matches!(
            AppConfig::from_toml_str("history_limit = \"many\""),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "log_level = \"debug\"\nseed_samples = false").expect("write config");

        let config = AppConfig::load(file.path()).expect("config should load");
        assert_eq!(config.log_level, "debug");
        assert!(!config.seed_samples);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = AppConfig::load(Path::new("/definitely/not/here/lending.toml"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn env_overrides_apply() {
        let config = AppConfig::default()
            .apply_env_with(vars(&[(LOG_LEVEL_ENV, "trace"), (HISTORY_LIMIT_ENV, " 20 ")]));
        assert_eq!(
            config.ok(),
            Some(AppConfig { log_level: "trace".into(), history_limit: 20, ..AppConfig::default() })
        );
    }

    #[test]
    fn blank_level_override_is_ignored() {
        let config = AppConfig::default().apply_env_with(vars(&[(LOG_LEVEL_ENV, "  ")]));
        assert_eq!(config.ok().map(|c| c.log_level), Some("info".to_string()));
    }

    #[test]
    fn bad_history_limit_override_errors() {
        let result = AppConfig::default().apply_env_with(vars(&[(HISTORY_LIMIT_ENV, "-3")]));
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains(HISTORY_LIMIT_ENV)));
    }
}
