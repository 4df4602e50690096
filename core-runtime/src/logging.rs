//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack for the player core. Library
//! crates only emit through the `tracing` macros; hosts decide format and
//! filtering once at startup through [`init_logging`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_filter("core_playback=debug,core_loop=info");
//!
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Player starting");
//! ```
//!
//! The `RUST_LOG` environment variable still applies when no explicit
//! filter string is configured.

use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::error::{Error, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level when no filter string is given
    pub level: Level,
    /// Custom filter string (e.g., "core_playback=debug,core_loop=trace")
    pub filter: Option<String>,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Sets the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets an explicit filter string, overriding the default level.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Controls whether the emitting module is shown.
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`Error::LoggingInit`] when the filter string does not parse or
/// a subscriber was already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = match &config.filter {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| Error::LoggingInit(e.to_string()))?
        }
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy(),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| Error::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(config.filter.is_none());
        assert!(config.display_target);
    }

    #[test]
    fn config_builders() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(Level::DEBUG)
            .with_filter("core_playback=trace")
            .with_target(false);

        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.filter.as_deref(), Some("core_playback=trace"));
        assert!(!config.display_target);
    }

    #[test]
    fn bad_filter_string_is_rejected() {
        let config = LoggingConfig::default().with_filter("not==valid==");
        assert!(init_logging(config).is_err());
    }

    #[test]
    fn second_init_fails() {
        let config = LoggingConfig::default().with_format(LogFormat::Compact);
        // The first call in this process owns the global subscriber; the
        // second must report a clean error rather than panic.
        let first = init_logging(config.clone());
        let second = init_logging(config);
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
