// ABOUTME: Persisted model artifact loading into an immutable, capability-resolved bundle
// ABOUTME: Classifier and scaler are required; alignment falls back to the canonical order
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted artifact loading.
//!
//! The classifier, scaler, and feature alignment are persisted together at
//! training time and loaded here into one [`ModelBundle`]: immutable,
//! process-wide, shared read-only by all requests. Capabilities (probability
//! output, feature importances) are resolved once during the load, never
//! re-probed per request.

/// Classifier families and the scoring trait
pub mod classifier;
/// Opaque blob store seam
pub mod store;

pub use classifier::{Classifier, ClassifierArtifact, Stump};
pub use store::{ArtifactStore, FilesystemArtifactStore};

use crate::errors::{AppError, AppResult};
use crate::intelligence::encoding::{FeatureAlignment, Scaler};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Artifact name of the persisted classifier
pub const CLASSIFIER_ARTIFACT: &str = "classifier.json";
/// Artifact name of the persisted scaler
pub const SCALER_ARTIFACT: &str = "scaler.json";
/// Artifact name of the persisted feature alignment
pub const ALIGNMENT_ARTIFACT: &str = "alignment.json";

/// Number of feature contributions surfaced per prediction
const TOP_CONTRIBUTIONS: usize = 5;

/// The loaded classifier/scaler/alignment triple plus resolved capabilities
pub struct ModelBundle {
    /// The fitted classifier
    pub classifier: Box<dyn Classifier>,
    /// The training-time affine scaler
    pub scaler: Scaler,
    /// The frozen feature order and code table
    pub alignment: FeatureAlignment,
    /// Whether the alignment came from the persisted artifact (false means
    /// the hardcoded canonical fallback is in effect)
    pub alignment_persisted: bool,
    /// Whether the classifier exposes a calibrated probability
    pub has_probability: bool,
    /// Top global feature contributions, name-aligned; None when the
    /// classifier exposes no importances
    pub top_contributions: Option<Vec<(String, f64)>>,
    /// When this bundle was loaded
    pub loaded_at: DateTime<Utc>,
}

impl ModelBundle {
    /// Load and validate the full bundle from an artifact store.
    ///
    /// The classifier and scaler are required. A missing alignment artifact
    /// degrades to the hardcoded canonical alignment with a warning; a
    /// corrupt one fails the load.
    ///
    /// # Errors
    /// [`AppError::ArtifactMissing`] or [`AppError::ArtifactLoad`] when the
    /// classifier or scaler is absent/unreadable, or when the three
    /// artifacts disagree on the feature dimension.
    pub async fn load(store: &dyn ArtifactStore) -> AppResult<Self> {
        let classifier_bytes = store.read(CLASSIFIER_ARTIFACT).await?;
        let classifier = ClassifierArtifact::from_bytes(&classifier_bytes)?.into_classifier();

        let scaler_bytes = store.read(SCALER_ARTIFACT).await?;
        let scaler = Scaler::from_bytes(&scaler_bytes)?;

        let (alignment, alignment_persisted) = match store.read(ALIGNMENT_ARTIFACT).await {
            Ok(bytes) => (FeatureAlignment::from_bytes(&bytes)?, true),
            Err(AppError::ArtifactMissing(_)) => {
                warn!(
                    artifact = ALIGNMENT_ARTIFACT,
                    "alignment artifact absent, falling back to canonical feature order"
                );
                (FeatureAlignment::canonical(), false)
            }
            Err(err) => return Err(err),
        };

        let n_features = classifier.n_features();
        if scaler.len() != n_features || alignment.len() != n_features {
            return Err(AppError::artifact_load(format!(
                "feature dimension mismatch: classifier={n_features}, scaler={}, alignment={}",
                scaler.len(),
                alignment.len()
            )));
        }

        // Capability resolution happens here, once per process
        let probe = vec![0.0; n_features];
        let has_probability = classifier.predict_probability(&probe).is_some();
        let top_contributions = classifier
            .feature_importances()
            .map(|importances| top_contributions(&alignment, &importances));

        info!(
            classifier = classifier.kind(),
            features = n_features,
            alignment_persisted,
            has_probability,
            has_importances = top_contributions.is_some(),
            "model bundle loaded"
        );

        Ok(Self {
            classifier,
            scaler,
            alignment,
            alignment_persisted,
            has_probability,
            top_contributions,
            loaded_at: Utc::now(),
        })
    }
}

/// Top-N importances paired with their feature names, descending
fn top_contributions(alignment: &FeatureAlignment, importances: &[f64]) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = alignment
        .feature_order
        .iter()
        .zip(importances)
        .map(|(name, value)| (name.clone(), *value))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(TOP_CONTRIBUTIONS);
    ranked
}
