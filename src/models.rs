// ABOUTME: Domain models for training weeks, athlete profiles, and prediction results
// ABOUTME: Timeline is a validated, immutable, week-ordered view of one athlete's history
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models and wire types.
//!
//! Field names on the serde surface mirror the external JSON contract
//! exactly (`week`, `weekly_load`, `daily_loads`, `risk_level`, ...), so the
//! transport layer can pass these types through unchanged.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single week of training data for one athlete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingWeek {
    /// Week number, unique per athlete, starting at 1
    pub week: u32,
    /// Total weekly training load (miles or arbitrary load units)
    pub weekly_load: f64,
    /// Per-day training loads within the week
    pub daily_loads: Vec<f64>,
    /// Historical injury flag for this week. Absent in pure-inference
    /// payloads and defaults to false.
    #[serde(default)]
    pub injured: bool,
}

impl TrainingWeek {
    /// Convenience constructor for an uninjured week
    #[must_use]
    pub fn new(week: u32, weekly_load: f64, daily_loads: Vec<f64>) -> Self {
        Self {
            week,
            weekly_load,
            daily_loads,
            injured: false,
        }
    }
}

/// Athlete demographic and baseline information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Athlete age in years
    pub age: u32,
    /// Years of training experience
    pub experience_years: u32,
    /// Baseline weekly training load
    pub baseline_weekly_load: f64,
}

/// A validated, week-ordered training history for one athlete.
///
/// Construction sorts records ascending by week and rejects duplicate weeks
/// and malformed records. Once built the timeline is immutable; metric
/// functions only ever read it.
#[derive(Debug, Clone)]
pub struct Timeline {
    weeks: Vec<TrainingWeek>,
}

impl Timeline {
    /// Build a timeline from raw training weeks.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] if any record has week 0, a
    /// non-positive weekly load, or empty daily loads, or if two records
    /// share a week number.
    pub fn new(mut weeks: Vec<TrainingWeek>) -> AppResult<Self> {
        for record in &weeks {
            if record.week == 0 {
                return Err(AppError::validation("week numbers start at 1"));
            }
            if record.weekly_load <= 0.0 || !record.weekly_load.is_finite() {
                return Err(AppError::validation(format!(
                    "week {}: weekly_load must be a positive number",
                    record.week
                )));
            }
            if record.daily_loads.is_empty() {
                return Err(AppError::validation(format!(
                    "week {}: daily_loads must be non-empty",
                    record.week
                )));
            }
        }

        weeks.sort_by_key(|w| w.week);
        if let Some(pair) = weeks.windows(2).find(|pair| pair[0].week == pair[1].week) {
            return Err(AppError::validation(format!(
                "duplicate week {} in training history",
                pair[0].week
            )));
        }

        Ok(Self { weeks })
    }

    /// All records, sorted ascending by week
    #[must_use]
    pub fn records(&self) -> &[TrainingWeek] {
        &self.weeks
    }

    /// Record for an exact week number, if present
    #[must_use]
    pub fn get(&self, week: u32) -> Option<&TrainingWeek> {
        self.weeks
            .binary_search_by_key(&week, |w| w.week)
            .ok()
            .map(|idx| &self.weeks[idx])
    }

    /// Position of a week number within the ordered records
    #[must_use]
    pub fn position(&self, week: u32) -> Option<usize> {
        self.weeks.binary_search_by_key(&week, |w| w.week).ok()
    }

    /// Highest week number present, the conventional prediction target
    #[must_use]
    pub fn latest_week(&self) -> Option<u32> {
        self.weeks.last().map(|w| w.week)
    }

    /// Number of recorded weeks
    #[must_use]
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Whether the timeline holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Injury risk tier derived from the classifier's probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// risk score below 0.3
    Low,
    /// risk score in [0.3, 0.6)
    Moderate,
    /// risk score at or above 0.6
    High,
}

impl RiskLevel {
    /// Pure step function of the risk score at cutoffs 0.3 and 0.6,
    /// boundary-inclusive upward.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            Self::Low
        } else if score < 0.6 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// Result of an injury risk prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Risk tier
    pub risk_level: RiskLevel,
    /// Injury risk probability in [0, 1]
    pub risk_score: f64,
    /// Acute:Chronic Workload Ratio at the target week
    pub acwr: f64,
    /// Training monotony at the target week
    pub monotony: f64,
    /// Training strain at the target week
    pub strain: f64,
    /// Week-over-week load change percentage at the target week
    pub week_over_week_change: f64,
    /// Ordered personalized training recommendations
    pub recommendations: Vec<String>,
    /// Top feature contributions to the risk score; omitted when the
    /// classifier exposes no global importances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_contributions: Option<HashMap<String, f64>>,
}

/// Information about the loaded model, for readiness reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Classifier family name, when loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier_kind: Option<String>,
    /// Feature order in effect at serving time
    pub feature_order: Vec<String>,
    /// Whether the classifier artifact loaded
    pub classifier_loaded: bool,
    /// Whether the scaler artifact loaded
    pub scaler_loaded: bool,
    /// Whether the persisted alignment loaded (false means the hardcoded
    /// canonical fallback is in effect)
    pub alignment_loaded: bool,
    /// Whether scoring is unavailable
    pub degraded: bool,
    /// Degradation reason, when degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
    /// When the model bundle was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}
