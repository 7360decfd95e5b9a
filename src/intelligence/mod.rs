// ABOUTME: Intelligence module exposing causal metrics, feature assembly, and scoring
// ABOUTME: Aggregates the feature-engineering pipeline behind the predictor service
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Causal feature engineering and injury risk scoring.
//!
//! The pipeline runs leaves-first: the causal metric library computes
//! per-week workload metrics without ever reading future weeks, the feature
//! assembler combines them with demographics into a named mapping, the
//! encoder freezes that mapping into the training-time vector layout, and
//! the predictor scores it through the loaded classifier.

/// Train/serve vector encoding and feature alignment
pub mod encoding;
/// Feature assembly from metrics and demographics
pub mod features;
/// Causal per-week workload metric library
pub mod metrics;
/// Injury risk predictor service
pub mod predictor;
/// Rule-based training recommendations
pub mod recommendation_engine;

pub use encoding::{encode_features, FeatureAlignment, Scaler};
pub use features::{assemble_features, FeatureSet, FeatureValue, CANONICAL_FEATURE_ORDER};
pub use metrics::WorkloadCalculator;
pub use predictor::InjuryRiskPredictor;
