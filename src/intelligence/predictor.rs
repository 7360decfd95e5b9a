// ABOUTME: Injury risk predictor service wiring features, encoding, and the classifier
// ABOUTME: Loads the model bundle once behind single-flight init and shares it read-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injury risk predictor service.
//!
//! An explicitly constructed, immutable service object. The
//! classifier/scaler/alignment bundle loads lazily on first use behind
//! single-flight initialization: concurrent first requests share one
//! in-flight load instead of racing. A failed load is remembered as a
//! degraded state for the process lifetime; the service reports degraded,
//! not down.

use crate::artifacts::{ArtifactStore, ModelBundle};
use crate::errors::{AppError, AppResult};
use crate::intelligence::encoding::encode_features;
use crate::intelligence::features::assemble_features;
use crate::intelligence::recommendation_engine::generate_recommendations;
use crate::models::{AthleteProfile, ModelInfo, PredictionResult, RiskLevel, Timeline};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

/// Outcome of the one-time bundle load
enum ModelState {
    /// Bundle loaded and ready for scoring
    Ready(Arc<ModelBundle>),
    /// Load failed; scoring unavailable, reason retained for reporting
    Degraded { missing: bool, reason: String },
}

/// Injury risk predictor over a persisted model bundle
pub struct InjuryRiskPredictor {
    store: Arc<dyn ArtifactStore>,
    state: OnceCell<ModelState>,
}

impl InjuryRiskPredictor {
    /// Create a predictor reading artifacts from the given store. Nothing is
    /// loaded until the first request.
    #[must_use]
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            store,
            state: OnceCell::new(),
        }
    }

    /// Eagerly load the model bundle at startup instead of on first request.
    ///
    /// # Errors
    /// Propagates the load failure; the predictor still ends up in the same
    /// degraded state a lazy load would have produced.
    pub async fn warm_up(&self) -> AppResult<()> {
        match self.model_state().await {
            ModelState::Ready(_) => Ok(()),
            ModelState::Degraded { missing, reason } => Err(degraded_error(*missing, reason)),
        }
    }

    async fn model_state(&self) -> &ModelState {
        self.state
            .get_or_init(|| async {
                match ModelBundle::load(self.store.as_ref()).await {
                    Ok(bundle) => ModelState::Ready(Arc::new(bundle)),
                    Err(err) => {
                        error!(error = %err, "model bundle load failed, scoring degraded");
                        ModelState::Degraded {
                            missing: matches!(err, AppError::ArtifactMissing(_)),
                            reason: err.to_string(),
                        }
                    }
                }
            })
            .await
    }

    /// Predict injury risk for one athlete at the latest recorded week.
    ///
    /// # Errors
    /// [`AppError::Validation`] on an empty timeline,
    /// [`AppError::ArtifactMissing`]/[`AppError::ArtifactLoad`] when the
    /// model bundle is unavailable, and [`AppError::Internal`] when the
    /// classifier itself fails.
    pub async fn predict(
        &self,
        timeline: &Timeline,
        profile: &AthleteProfile,
    ) -> AppResult<PredictionResult> {
        let target_week = timeline
            .latest_week()
            .ok_or_else(|| AppError::validation("training history cannot be empty"))?;

        let bundle = match self.model_state().await {
            ModelState::Ready(bundle) => Arc::clone(bundle),
            ModelState::Degraded { missing, reason } => {
                return Err(degraded_error(*missing, reason));
            }
        };

        let features = assemble_features(timeline, profile, target_week)?;
        let encoded = encode_features(&features, &bundle.alignment);
        let scaled = bundle.scaler.transform(&encoded)?;

        let raw_score = if bundle.has_probability {
            match bundle.classifier.predict_probability(&scaled) {
                Some(probability) => probability?,
                None => bundle.classifier.predict(&scaled)?,
            }
        } else {
            bundle.classifier.predict(&scaled)?
        };
        let risk_score = raw_score.clamp(0.0, 1.0);
        let risk_level = RiskLevel::from_score(risk_score);

        let recommendations = generate_recommendations(&features, risk_score);
        let feature_contributions = bundle.top_contributions.as_ref().map(|ranked| {
            ranked
                .iter()
                .cloned()
                .collect::<HashMap<String, f64>>()
        });

        debug!(
            target_week,
            risk_score,
            risk_level = ?risk_level,
            "prediction complete"
        );

        Ok(PredictionResult {
            risk_level,
            risk_score,
            acwr: features.numeric("acwr"),
            monotony: features.numeric("monotony"),
            strain: features.numeric("strain"),
            week_over_week_change: features.numeric("week_over_week_change"),
            recommendations,
            feature_contributions,
        })
    }

    /// Readiness and identity information about the loaded model
    pub async fn model_info(&self) -> ModelInfo {
        match self.model_state().await {
            ModelState::Ready(bundle) => {
                info!(classifier = bundle.classifier.kind(), "model info requested");
                ModelInfo {
                    classifier_kind: Some(bundle.classifier.kind().to_owned()),
                    feature_order: bundle.alignment.feature_order.clone(),
                    classifier_loaded: true,
                    scaler_loaded: true,
                    alignment_loaded: bundle.alignment_persisted,
                    degraded: false,
                    degraded_reason: None,
                    loaded_at: Some(bundle.loaded_at),
                }
            }
            ModelState::Degraded { reason, .. } => ModelInfo {
                classifier_kind: None,
                feature_order: Vec::new(),
                classifier_loaded: false,
                scaler_loaded: false,
                alignment_loaded: false,
                degraded: true,
                degraded_reason: Some(reason.clone()),
                loaded_at: None,
            },
        }
    }
}

fn degraded_error(missing: bool, reason: &str) -> AppError {
    if missing {
        AppError::artifact_missing(reason)
    } else {
        AppError::artifact_load(reason)
    }
}
