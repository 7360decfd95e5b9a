// ABOUTME: Main library entry point for the StrideGuard injury risk engine
// ABOUTME: Exposes domain models, causal metrics, encoding, and the predictor service
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # StrideGuard
//!
//! An injury risk prediction engine for weekly endurance training-load data.
//! A per-athlete timeline of weekly loads is turned into a fixed-order numeric
//! feature vector and scored by a previously fit classifier, producing a
//! calibrated risk probability plus sports-science diagnostics.
//!
//! ## Architecture
//!
//! - **Models**: validated domain types (`TrainingWeek`, `AthleteProfile`,
//!   `Timeline`, `PredictionResult`)
//! - **Intelligence**: causal metric library, feature assembly, train/serve
//!   vector encoding, rule-based recommendations, and the predictor service
//! - **Artifacts**: opaque blob store seam and capability-resolved classifier,
//!   scaler, and alignment loading
//!
//! The classifier, scaler, and feature alignment are loaded once behind
//! single-flight initialization and shared read-only across concurrent
//! requests. A load failure degrades scoring without taking the process down.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strideguard::artifacts::FilesystemArtifactStore;
//! use strideguard::errors::AppResult;
//! use strideguard::intelligence::predictor::InjuryRiskPredictor;
//! use strideguard::models::{AthleteProfile, Timeline, TrainingWeek};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(FilesystemArtifactStore::new("models"));
//!     let predictor = InjuryRiskPredictor::new(store);
//!
//!     let timeline = Timeline::new(vec![
//!         TrainingWeek::new(1, 20.0, vec![5.0, 5.0, 5.0, 5.0]),
//!         TrainingWeek::new(2, 22.0, vec![6.0, 5.0, 6.0, 5.0]),
//!     ])?;
//!     let profile = AthleteProfile {
//!         age: 30,
//!         experience_years: 5,
//!         baseline_weekly_load: 25.0,
//!     };
//!
//!     let result = predictor.predict(&timeline, &profile).await?;
//!     println!("risk: {:?} ({:.2})", result.risk_level, result.risk_score);
//!     Ok(())
//! }
//! ```

/// Opaque artifact store and persisted classifier/scaler/alignment loading
pub mod artifacts;
/// Environment-driven engine configuration
pub mod config;
/// Unified error types for the engine
pub mod errors;
/// Causal metrics, feature assembly, encoding, and scoring
pub mod intelligence;
/// Structured logging configuration
pub mod logging;
/// Domain models and wire types
pub mod models;
