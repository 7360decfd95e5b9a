// ABOUTME: Logging configuration and structured logging setup for the engine
// ABOUTME: Configures log levels and output formats via tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging configuration.
//!
//! Scoring itself has no side effects beyond logging, so the log stream is
//! the only runtime observability surface: encoding-skew counters, degraded
//! artifact state, and per-request prediction summaries all flow through
//! `tracing`.

use crate::errors::{AppError, AppResult};
use std::env;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Build logging configuration from environment variables.
    ///
    /// `RUST_LOG` takes precedence for the filter; `STRIDEGUARD_LOG_FORMAT`
    /// selects `json`, `pretty`, or `compact`.
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG")
            .or_else(|_| env::var("STRIDEGUARD_LOG_LEVEL"))
            .unwrap_or_else(|_| "info".into());

        let format = match env::var("STRIDEGUARD_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        Self {
            level,
            format,
            include_location: false,
        }
    }
}

/// Initialize the global tracing subscriber from the given configuration.
///
/// # Errors
/// Returns [`AppError::Internal`] if a subscriber is already installed or the
/// filter directive cannot be parsed.
pub fn init_logging(config: &LoggingConfig) -> AppResult<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| AppError::internal(format!("invalid log filter '{}': {e}", config.level)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_file(config.include_location))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_file(config.include_location))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_file(config.include_location))
            .try_init(),
    };

    result.map_err(|e| AppError::internal(format!("failed to install subscriber: {e}")))
}
