//! Service configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! [sweep]
//! enabled = true
//! interval_secs = 86400
//! run_on_start = false
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallguardConfig {
    /// Spam sweep scheduling
    pub sweep: SweepConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl CallguardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML document
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` on malformed TOML and
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sweep.interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// With sweep interval
    #[inline]
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep.interval_secs = interval.as_secs();
        self
    }

    /// With sweep on start-up
    #[inline]
    #[must_use]
    pub fn with_run_on_start(mut self, run_on_start: bool) -> Self {
        self.sweep.run_on_start = run_on_start;
        self
    }

    /// With sweep scheduling switched on or off
    #[inline]
    #[must_use]
    pub fn with_sweep_enabled(mut self, enabled: bool) -> Self {
        self.sweep.enabled = enabled;
        self
    }

    /// With log level directive
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}

/// Spam sweep scheduling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Whether the scheduler runs at all
    pub enabled: bool,
    /// Seconds between sweeps
    pub interval_secs: u64,
    /// Sweep once immediately when the scheduler starts
    pub run_on_start: bool,
}

impl SweepConfig {
    /// Interval between sweeps
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 24 * 60 * 60,
            run_on_start: false,
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or unknown field
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config: {0}")]
    Invalid(String),

    /// Tracing subscriber could not be built
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CallguardConfig::from_toml_str("").unwrap();
        assert_eq!(config, CallguardConfig::default());
        assert_eq!(config.sweep.interval(), Duration::from_secs(86_400));
        assert!(config.sweep.enabled);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parses_partial_document() {
        let config = CallguardConfig::from_toml_str(
            r#"
            [sweep]
            interval_secs = 60
            run_on_start = true

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.sweep.interval_secs, 60);
        assert!(config.sweep.run_on_start);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = CallguardConfig::from_toml_str("[sweep]\ninterval_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = CallguardConfig::from_toml_str("[sweep]\nintervall = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = CallguardConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CallguardConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builder_methods() {
        let config = CallguardConfig::new()
            .with_sweep_interval(Duration::from_secs(30))
            .with_run_on_start(true)
            .with_sweep_enabled(false)
            .with_log_level("callguard_core=trace");

        assert_eq!(config.sweep.interval_secs, 30);
        assert!(config.sweep.run_on_start);
        assert!(!config.sweep.enabled);
        assert_eq!(config.logging.level, "callguard_core=trace");
    }
}
