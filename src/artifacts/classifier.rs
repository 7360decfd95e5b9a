// ABOUTME: Capability-typed classifier families loaded from persisted artifacts
// ABOUTME: Logistic regression and gradient stump ensembles behind one scoring trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier families.
//!
//! The engine consumes the classifier as a capability-typed black box:
//! numeric vector in, score out. Probability output and global feature
//! importances are optional capabilities resolved once at load time, never
//! re-probed per request.

use crate::errors::{AppError, AppResult};
use serde::Deserialize;

/// A fitted binary classifier over scaled feature vectors
pub trait Classifier: Send + Sync {
    /// Classifier family name for readiness reporting
    fn kind(&self) -> &'static str;

    /// Raw prediction for a scaled vector. For families without calibrated
    /// probabilities this is an uncalibrated margin.
    ///
    /// # Errors
    /// Returns [`AppError::Internal`] on a feature-count mismatch.
    fn predict(&self, vector: &[f64]) -> AppResult<f64>;

    /// Probability of the positive class, when this family exposes one
    ///
    /// # Errors
    /// Returns [`AppError::Internal`] on a feature-count mismatch.
    fn predict_probability(&self, vector: &[f64]) -> Option<AppResult<f64>>;

    /// Global feature importances aligned to the training feature order,
    /// when this family exposes them
    fn feature_importances(&self) -> Option<Vec<f64>>;

    /// Number of features the classifier was fit on
    fn n_features(&self) -> usize;
}

/// Serialized classifier artifact, tagged by family
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// Logistic regression: weights, intercept, sigmoid probability
    LogisticRegression {
        /// Per-feature coefficients
        weights: Vec<f64>,
        /// Intercept term
        intercept: f64,
    },
    /// Additive ensemble of decision stumps over scaled features
    GradientStumps {
        /// The fitted stumps
        stumps: Vec<Stump>,
        /// Base margin added to every prediction
        bias: f64,
        /// Number of features the ensemble was fit on
        n_features: usize,
        /// Whether the margin is sigmoid-calibrated into a probability
        #[serde(default)]
        calibrated: bool,
    },
}

/// A single decision stump: threshold split on one feature
#[derive(Debug, Clone, Deserialize)]
pub struct Stump {
    /// Index of the feature this stump splits on
    pub feature: usize,
    /// Split threshold on the scaled feature value
    pub threshold: f64,
    /// Margin contribution when the feature is at or below the threshold
    pub left: f64,
    /// Margin contribution when the feature is above the threshold
    pub right: f64,
    /// Training-time split gain, used for feature importances
    #[serde(default)]
    pub gain: f64,
}

impl ClassifierArtifact {
    /// Parse a persisted classifier blob.
    ///
    /// # Errors
    /// Returns [`AppError::ArtifactLoad`] if the blob is not a valid
    /// classifier document or is internally inconsistent.
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let artifact: Self = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> AppResult<()> {
        match self {
            Self::LogisticRegression { weights, .. } => {
                if weights.is_empty() {
                    return Err(AppError::artifact_load(
                        "logistic regression artifact has no weights",
                    ));
                }
            }
            Self::GradientStumps {
                stumps, n_features, ..
            } => {
                if *n_features == 0 {
                    return Err(AppError::artifact_load(
                        "gradient stumps artifact declares zero features",
                    ));
                }
                if let Some(bad) = stumps.iter().find(|s| s.feature >= *n_features) {
                    return Err(AppError::artifact_load(format!(
                        "stump references feature {} but ensemble has {n_features}",
                        bad.feature
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the runtime classifier for this artifact
    #[must_use]
    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            Self::LogisticRegression { weights, intercept } => {
                Box::new(LogisticRegressionClassifier { weights, intercept })
            }
            Self::GradientStumps {
                stumps,
                bias,
                n_features,
                calibrated,
            } => Box::new(GradientStumpsClassifier {
                stumps,
                bias,
                n_features,
                calibrated,
            }),
        }
    }
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

fn check_dimensions(expected: usize, got: usize) -> AppResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(AppError::internal(format!(
            "classifier expects {expected} features, got {got}"
        )))
    }
}

/// Logistic regression over scaled features
struct LogisticRegressionClassifier {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticRegressionClassifier {
    fn margin(&self, vector: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(vector)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LogisticRegressionClassifier {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn predict(&self, vector: &[f64]) -> AppResult<f64> {
        check_dimensions(self.weights.len(), vector.len())?;
        Ok(sigmoid(self.margin(vector)))
    }

    fn predict_probability(&self, vector: &[f64]) -> Option<AppResult<f64>> {
        Some(
            check_dimensions(self.weights.len(), vector.len())
                .map(|()| sigmoid(self.margin(vector))),
        )
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        Some(self.weights.iter().map(|w| w.abs()).collect())
    }

    fn n_features(&self) -> usize {
        self.weights.len()
    }
}

/// Additive decision-stump ensemble over scaled features
struct GradientStumpsClassifier {
    stumps: Vec<Stump>,
    bias: f64,
    n_features: usize,
    calibrated: bool,
}

impl GradientStumpsClassifier {
    fn margin(&self, vector: &[f64]) -> f64 {
        self.stumps.iter().fold(self.bias, |acc, stump| {
            let value = vector[stump.feature];
            if value <= stump.threshold {
                acc + stump.left
            } else {
                acc + stump.right
            }
        })
    }
}

impl Classifier for GradientStumpsClassifier {
    fn kind(&self) -> &'static str {
        "gradient_stumps"
    }

    fn predict(&self, vector: &[f64]) -> AppResult<f64> {
        check_dimensions(self.n_features, vector.len())?;
        let margin = self.margin(vector);
        if self.calibrated {
            Ok(sigmoid(margin))
        } else {
            Ok(margin)
        }
    }

    fn predict_probability(&self, vector: &[f64]) -> Option<AppResult<f64>> {
        if !self.calibrated {
            return None;
        }
        Some(check_dimensions(self.n_features, vector.len()).map(|()| sigmoid(self.margin(vector))))
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        if self.stumps.iter().all(|s| s.gain == 0.0) {
            return None;
        }
        let mut importances = vec![0.0; self.n_features];
        for stump in &self.stumps {
            importances[stump.feature] += stump.gain;
        }
        Some(importances)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
