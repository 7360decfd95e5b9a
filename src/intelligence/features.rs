// ABOUTME: Feature assembler combining causal metrics with athlete demographics
// ABOUTME: Produces the canonical 17-name feature mapping for one athlete-week
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature assembly.
//!
//! The assembler turns a timeline, a profile, and a target week into a named
//! feature mapping holding exactly the 17 canonical features the classifier
//! was trained on. Names and semantics are frozen; changing either silently
//! corrupts every prediction downstream.

use crate::errors::{AppError, AppResult};
use crate::intelligence::metrics::{
    self, ACWR_STREAK_THRESHOLD, BASELINE_WINDOW_WEEKS, CHRONIC_WINDOW_WEEKS,
    INJURY_WINDOW_WEEKS, TREND_WINDOW_WEEKS,
};
use crate::models::{AthleteProfile, Timeline};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The canonical feature names, in training order. This is the hardcoded
/// fallback when no persisted alignment is available.
pub const CANONICAL_FEATURE_ORDER: [&str; 17] = [
    "acute_load",
    "chronic_load",
    "acwr",
    "monotony",
    "strain",
    "week_over_week_change",
    "acwr_trend",
    "weeks_above_threshold",
    "distance_from_baseline",
    "previous_week_acwr",
    "two_weeks_ago_acwr",
    "recent_injury",
    "age",
    "age_group",
    "experience_years",
    "experience_level",
    "baseline_weekly_miles",
];

/// A single feature value: numeric, or a categorical label that the encoder
/// maps through the training-time code table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Numeric feature
    Numeric(f64),
    /// Categorical feature label
    Categorical(String),
}

/// Named feature mapping for one athlete-week
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    values: HashMap<String, FeatureValue>,
}

impl FeatureSet {
    /// Insert a numeric feature
    pub fn insert_numeric(&mut self, name: &str, value: f64) {
        self.values
            .insert(name.to_owned(), FeatureValue::Numeric(value));
    }

    /// Insert a categorical feature
    pub fn insert_categorical(&mut self, name: &str, label: &str) {
        self.values
            .insert(name.to_owned(), FeatureValue::Categorical(label.to_owned()));
    }

    /// Look up a feature by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    /// Numeric value of a feature, or 0.0 if absent or categorical
    #[must_use]
    pub fn numeric(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(FeatureValue::Numeric(v)) => *v,
            _ => 0.0,
        }
    }

    /// Number of features present
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bucket an age in years into its categorical group
#[must_use]
pub fn bin_age(age: u32) -> &'static str {
    if age < 26 {
        "young_adult"
    } else if age < 36 {
        "adult"
    } else if age < 46 {
        "masters"
    } else {
        "senior"
    }
}

/// Bucket years of experience into its categorical level
#[must_use]
pub fn bin_experience(experience_years: u32) -> &'static str {
    if experience_years < 3 {
        "novice"
    } else if experience_years < 6 {
        "intermediate"
    } else if experience_years < 10 {
        "advanced"
    } else {
        "expert"
    }
}

/// Assemble the canonical feature set for one athlete at the target week.
///
/// # Errors
/// Returns [`AppError::Validation`] if the timeline is empty, since no
/// target week is derivable.
pub fn assemble_features(
    timeline: &Timeline,
    profile: &AthleteProfile,
    target_week: u32,
) -> AppResult<FeatureSet> {
    if timeline.is_empty() {
        return Err(AppError::validation(
            "training history cannot be empty",
        ));
    }

    let mut features = FeatureSet::default();

    // Core workload metrics
    features.insert_numeric("acute_load", metrics::acute_load(timeline, target_week));
    features.insert_numeric(
        "chronic_load",
        metrics::chronic_load(timeline, target_week, CHRONIC_WINDOW_WEEKS),
    );
    features.insert_numeric("acwr", metrics::acwr(timeline, target_week));
    features.insert_numeric(
        "monotony",
        metrics::monotony(timeline, target_week, CHRONIC_WINDOW_WEEKS),
    );
    features.insert_numeric("strain", metrics::strain(timeline, target_week));
    features.insert_numeric(
        "week_over_week_change",
        metrics::week_over_week_change(timeline, target_week),
    );

    // Derived metrics
    features.insert_numeric(
        "acwr_trend",
        metrics::acwr_trend(timeline, target_week, TREND_WINDOW_WEEKS),
    );
    features.insert_numeric(
        "weeks_above_threshold",
        f64::from(metrics::weeks_above_threshold(
            timeline,
            target_week,
            ACWR_STREAK_THRESHOLD,
        )),
    );
    features.insert_numeric(
        "distance_from_baseline",
        metrics::distance_from_baseline(timeline, target_week, BASELINE_WINDOW_WEEKS),
    );

    // Lag features
    features.insert_numeric(
        "previous_week_acwr",
        metrics::lagged_acwr(timeline, target_week, 1),
    );
    features.insert_numeric(
        "two_weeks_ago_acwr",
        metrics::lagged_acwr(timeline, target_week, 2),
    );
    features.insert_numeric(
        "recent_injury",
        metrics::recent_injury(timeline, target_week, INJURY_WINDOW_WEEKS),
    );

    // Demographics
    features.insert_numeric("age", f64::from(profile.age));
    features.insert_categorical("age_group", bin_age(profile.age));
    features.insert_numeric("experience_years", f64::from(profile.experience_years));
    features.insert_categorical("experience_level", bin_experience(profile.experience_years));
    features.insert_numeric("baseline_weekly_miles", profile.baseline_weekly_load);

    Ok(features)
}
