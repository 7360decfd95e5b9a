// ABOUTME: Train/serve vector encoding using the frozen feature order and code table
// ABOUTME: Applies the persisted affine scaler; never refits anything at serving time
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector encoding and train/serve alignment.
//!
//! This is the correctness-critical seam of the engine. The feature order
//! and the categorical code table are fit once at training time, persisted
//! next to the classifier and scaler, and loaded verbatim here. Serving
//! never invents its own order or codes, and never refits the scaler from
//! an incoming sample: doing either silently diverges from the mapping the
//! classifier was trained on.
//!
//! Schema skew at serving time is soft by design: an unseen categorical
//! label maps to the out-of-vocabulary sentinel and a missing feature name
//! encodes as 0.0. Both are logged so drift stays observable.

use crate::errors::{AppError, AppResult};
use crate::intelligence::features::{FeatureSet, FeatureValue, CANONICAL_FEATURE_ORDER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Code for a categorical label never seen at training time
pub const OUT_OF_VOCABULARY_CODE: i64 = 0;

/// Frozen feature order plus per-feature categorical code tables.
///
/// Fit once at training time and persisted with the classifier; the
/// canonical constructor is the logged degraded fallback when the persisted
/// artifact is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureAlignment {
    /// Feature names in the exact order the classifier was fit on
    pub feature_order: Vec<String>,
    /// Per-categorical-feature label to integer code tables
    pub categories: HashMap<String, HashMap<String, i64>>,
}

impl FeatureAlignment {
    /// The hardcoded canonical alignment: the frozen 17-name order with
    /// alphabetical label codes, matching the training pipeline's label
    /// encoding of the known buckets.
    #[must_use]
    pub fn canonical() -> Self {
        let mut categories = HashMap::new();
        categories.insert(
            "age_group".to_owned(),
            label_codes(&["adult", "masters", "senior", "young_adult"]),
        );
        categories.insert(
            "experience_level".to_owned(),
            label_codes(&["advanced", "expert", "intermediate", "novice"]),
        );

        Self {
            feature_order: CANONICAL_FEATURE_ORDER
                .iter()
                .map(|&n| n.to_owned())
                .collect(),
            categories,
        }
    }

    /// Parse a persisted alignment blob.
    ///
    /// # Errors
    /// Returns [`AppError::ArtifactLoad`] if the blob is not a valid
    /// alignment document or names no features.
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let alignment: Self = serde_json::from_slice(bytes)?;
        if alignment.feature_order.is_empty() {
            return Err(AppError::artifact_load(
                "alignment artifact has an empty feature order",
            ));
        }
        Ok(alignment)
    }

    /// Number of encoded features
    #[must_use]
    pub fn len(&self) -> usize {
        self.feature_order.len()
    }

    /// Whether the alignment names no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feature_order.is_empty()
    }
}

/// Labels sorted alphabetically by the caller, coded by position
fn label_codes(labels: &[&str]) -> HashMap<String, i64> {
    labels
        .iter()
        .enumerate()
        .map(|(code, &label)| (label.to_owned(), code as i64))
        .collect()
}

/// Encode a named feature set into the ordered numeric array the classifier
/// expects.
///
/// The output always has exactly `alignment.len()` entries. Unseen
/// categorical labels map to [`OUT_OF_VOCABULARY_CODE`]; names absent from
/// the feature set encode as 0.0. Neither condition raises.
#[must_use]
pub fn encode_features(features: &FeatureSet, alignment: &FeatureAlignment) -> Vec<f64> {
    alignment
        .feature_order
        .iter()
        .map(|name| match features.get(name) {
            Some(FeatureValue::Numeric(v)) => *v,
            Some(FeatureValue::Categorical(label)) => {
                encode_categorical(alignment, name, label)
            }
            None => {
                warn!(feature = %name, "feature missing at serving time, encoding as 0.0");
                0.0
            }
        })
        .collect()
}

fn encode_categorical(alignment: &FeatureAlignment, name: &str, label: &str) -> f64 {
    let code = alignment
        .categories
        .get(name)
        .and_then(|table| table.get(label).copied());

    match code {
        Some(code) => code as f64,
        None => {
            warn!(
                feature = %name,
                label = %label,
                "unseen categorical label at serving time, using out-of-vocabulary code"
            );
            OUT_OF_VOCABULARY_CODE as f64
        }
    }
}

/// The exact affine transform fit at training time.
///
/// `transform` is the only operation; the scaler is never refit at serving
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Per-feature means subtracted before scaling
    pub mean: Vec<f64>,
    /// Per-feature scale divisors
    pub scale: Vec<f64>,
}

impl Scaler {
    /// Parse a persisted scaler blob.
    ///
    /// # Errors
    /// Returns [`AppError::ArtifactLoad`] if the blob is invalid or the mean
    /// and scale vectors disagree in length.
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let scaler: Self = serde_json::from_slice(bytes)?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(AppError::artifact_load(format!(
                "scaler mean/scale length mismatch: {} vs {}",
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        Ok(scaler)
    }

    /// Number of features the scaler was fit on
    #[must_use]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Whether the scaler covers no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Apply the training-time affine transform to an encoded vector.
    ///
    /// Zero-variance columns (scale 0) pass through unscaled, matching the
    /// training pipeline's handling.
    ///
    /// # Errors
    /// Returns [`AppError::Internal`] on a vector length mismatch, which
    /// indicates artifact inconsistency rather than bad input data.
    pub fn transform(&self, vector: &[f64]) -> AppResult<Vec<f64>> {
        if vector.len() != self.mean.len() {
            return Err(AppError::internal(format!(
                "encoded vector has {} features but scaler was fit on {}",
                vector.len(),
                self.mean.len()
            )));
        }

        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                let divisor = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / divisor
            })
            .collect())
    }
}
