// ABOUTME: Environment-driven configuration for the injury risk engine
// ABOUTME: Resolves the artifact directory and logging settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-only engine configuration.

use crate::logging::LoggingConfig;
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Default directory containing persisted model artifacts
const DEFAULT_MODELS_DIR: &str = "models";

/// Engine configuration assembled from environment variables
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding `classifier.json`, `scaler.json`, `alignment.json`
    pub models_dir: PathBuf,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment.
    ///
    /// `STRIDEGUARD_MODELS_DIR` overrides the artifact directory; logging is
    /// resolved by [`LoggingConfig::from_env`].
    #[must_use]
    pub fn from_env() -> Self {
        let models_dir = env::var("STRIDEGUARD_MODELS_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_MODELS_DIR), PathBuf::from);

        debug!(models_dir = %models_dir.display(), "resolved engine configuration");

        Self {
            models_dir,
            logging: LoggingConfig::from_env(),
        }
    }
}
