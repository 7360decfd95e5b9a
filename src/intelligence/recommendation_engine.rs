// ABOUTME: Rule-based training recommendation engine driven by workload metrics
// ABOUTME: Evaluates a fixed, ordered, non-mutually-exclusive rule set per prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based training recommendations.
//!
//! The rule set is fixed and evaluated in a stable order; every applicable
//! rule fires, so a prediction can carry several recommendations at once.

use crate::intelligence::features::FeatureSet;

/// ACWR above which a sharp volume reduction is advised
const ACWR_HIGH_RISK: f64 = 1.5;
/// ACWR above which a moderate volume reduction is advised
const ACWR_ELEVATED: f64 = 1.3;
/// ACWR below which the athlete may be undertrained
const ACWR_UNDERTRAINED: f64 = 0.8;
/// Week-over-week load increase (%) considered a large spike
const WEEK_CHANGE_LARGE_PCT: f64 = 20.0;
/// Week-over-week load increase (%) worth monitoring
const WEEK_CHANGE_MODERATE_PCT: f64 = 15.0;
/// Monotony above which training variety is advised
const MONOTONY_HIGH: f64 = 2.0;
/// Strain above which extra recovery is advised
const STRAIN_HIGH: f64 = 150.0;
/// Risk score below which the athlete is in the low-risk zone
const RISK_LOW_ZONE: f64 = 0.3;
/// Risk score above which a deload is advised
const RISK_CRITICAL: f64 = 0.7;

/// Generate ordered training recommendations from the assembled features and
/// the classifier's risk score.
#[must_use]
pub fn generate_recommendations(features: &FeatureSet, risk_score: f64) -> Vec<String> {
    let acwr = features.numeric("acwr");
    let monotony = features.numeric("monotony");
    let week_change = features.numeric("week_over_week_change");
    let strain = features.numeric("strain");

    let mut recommendations = Vec::new();

    if acwr > ACWR_HIGH_RISK {
        recommendations.push(
            "HIGH RISK: ACWR is above 1.5. Reduce training volume by 20-30% this week."
                .to_owned(),
        );
    } else if acwr > ACWR_ELEVATED {
        recommendations.push(
            "MODERATE RISK: ACWR is elevated. Consider reducing volume by 10-15%.".to_owned(),
        );
    } else if acwr < ACWR_UNDERTRAINED {
        recommendations.push(
            "ACWR is low. You may be undertrained. Consider gradual volume increase.".to_owned(),
        );
    } else {
        recommendations.push(
            "ACWR is in the optimal range (0.8-1.3). Keep up the good work!".to_owned(),
        );
    }

    if week_change > WEEK_CHANGE_LARGE_PCT {
        recommendations.push(
            "Large week-over-week increase detected. Maintain current volume to avoid injury risk."
                .to_owned(),
        );
    } else if week_change > WEEK_CHANGE_MODERATE_PCT {
        recommendations.push(
            "Moderate week-over-week increase. Monitor for any signs of overuse.".to_owned(),
        );
    }

    if monotony > MONOTONY_HIGH {
        recommendations.push(
            "High training monotony detected. Add variety to your training routine.".to_owned(),
        );
    }

    if strain > STRAIN_HIGH {
        recommendations.push(
            "High training strain. Ensure adequate recovery between sessions.".to_owned(),
        );
    }

    if risk_score < RISK_LOW_ZONE {
        recommendations.push(
            "You're in a low-risk zone. Continue your current training plan.".to_owned(),
        );
    } else if risk_score > RISK_CRITICAL {
        recommendations.push(
            "HIGH INJURY RISK: Consider taking a deload week or consulting a sports medicine professional."
                .to_owned(),
        );
    }

    recommendations
}
