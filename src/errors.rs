// ABOUTME: Unified error types for validation, artifact loading, and scoring failures
// ABOUTME: Distinguishes client-recoverable errors from degraded-capability conditions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unified error handling for the StrideGuard engine.
//!
//! Errors fall into three classes with different blast radii:
//!
//! - [`AppError::Validation`] — malformed upstream data, client-recoverable
//! - [`AppError::ArtifactMissing`] / [`AppError::ArtifactLoad`] — the
//!   classifier/scaler/alignment artifacts are unreadable; fatal to scoring
//!   but non-fatal to the process, which reports degraded rather than down
//! - [`AppError::Internal`] — deterministic computation failure, not retried
//!
//! Encoding skew (unseen categories, missing feature names) is deliberately
//! *not* an error: it resolves to documented defaults and is logged for
//! drift observability.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias used throughout the engine
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete upstream data (client-recoverable)
    #[error("validation error: {0}")]
    Validation(String),

    /// A required persisted artifact was not found
    #[error("artifact missing: {0}")]
    ArtifactMissing(String),

    /// A persisted artifact exists but could not be read or parsed
    #[error("artifact load error: {0}")]
    ArtifactLoad(String),

    /// Internal computation failure (deterministic, not retried)
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a missing-artifact error for a named artifact
    #[must_use]
    pub fn artifact_missing(name: impl Into<String>) -> Self {
        Self::ArtifactMissing(name.into())
    }

    /// Create an artifact load error
    #[must_use]
    pub fn artifact_load(msg: impl Into<String>) -> Self {
        Self::ArtifactLoad(msg.into())
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable error code for wire/log classification
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::InvalidInput,
            Self::ArtifactMissing(_) => ErrorCode::ArtifactMissing,
            Self::ArtifactLoad(_) => ErrorCode::ArtifactLoadFailed,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether this error leaves the service degraded rather than the
    /// request merely rejected
    #[must_use]
    pub fn is_degraded_capability(&self) -> bool {
        matches!(self, Self::ArtifactMissing(_) | Self::ArtifactLoad(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::ArtifactLoad(format!("artifact deserialization failed: {err}"))
    }
}

/// Stable error codes used in logs and by the external transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The provided input is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A required model artifact was not found
    #[serde(rename = "ARTIFACT_MISSING")]
    ArtifactMissing,
    /// A model artifact could not be loaded
    #[serde(rename = "ARTIFACT_LOAD_FAILED")]
    ArtifactLoadFailed,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}
