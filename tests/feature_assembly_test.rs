// ABOUTME: Integration tests for feature assembly and demographic bucketization
// ABOUTME: Verifies the canonical 17-name contract and timeline validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use strideguard::errors::AppError;
use strideguard::intelligence::features::{
    assemble_features, bin_age, bin_experience, FeatureValue, CANONICAL_FEATURE_ORDER,
};
use strideguard::intelligence::metrics;
use strideguard::models::{AthleteProfile, Timeline, TrainingWeek};

fn timeline_from_loads(loads: &[f64]) -> Timeline {
    let weeks = loads
        .iter()
        .enumerate()
        .map(|(i, &load)| TrainingWeek::new(i as u32 + 1, load, vec![load / 4.0; 4]))
        .collect();
    Timeline::new(weeks).unwrap()
}

fn test_profile() -> AthleteProfile {
    AthleteProfile {
        age: 30,
        experience_years: 5,
        baseline_weekly_load: 25.0,
    }
}

#[test]
fn test_feature_set_contains_exactly_the_canonical_names() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    let features = assemble_features(&timeline, &test_profile(), 5).unwrap();

    assert_eq!(features.len(), CANONICAL_FEATURE_ORDER.len());
    for name in CANONICAL_FEATURE_ORDER {
        assert!(
            features.get(name).is_some(),
            "missing canonical feature {name}"
        );
    }
}

#[test]
fn test_feature_values_match_metric_library() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    let features = assemble_features(&timeline, &test_profile(), 5).unwrap();

    assert!((features.numeric("acute_load") - 35.0).abs() < 1e-9);
    assert!((features.numeric("chronic_load") - 28.0).abs() < 1e-9);
    assert!((features.numeric("acwr") - metrics::acwr(&timeline, 5)).abs() < 1e-12);
    assert!(
        (features.numeric("previous_week_acwr") - metrics::lagged_acwr(&timeline, 5, 1)).abs()
            < 1e-12
    );
    assert!(
        (features.numeric("two_weeks_ago_acwr") - metrics::lagged_acwr(&timeline, 5, 2)).abs()
            < 1e-12
    );
    assert!((features.numeric("age") - 30.0).abs() < 1e-12);
    assert!((features.numeric("experience_years") - 5.0).abs() < 1e-12);
    assert!((features.numeric("baseline_weekly_miles") - 25.0).abs() < 1e-12);
}

#[test]
fn test_categorical_features_are_labels_not_numbers() {
    let timeline = timeline_from_loads(&[20.0]);
    let features = assemble_features(&timeline, &test_profile(), 1).unwrap();

    assert_eq!(
        features.get("age_group"),
        Some(&FeatureValue::Categorical("adult".to_owned()))
    );
    assert_eq!(
        features.get("experience_level"),
        Some(&FeatureValue::Categorical("intermediate".to_owned()))
    );
}

#[test]
fn test_age_bucketization_boundaries() {
    assert_eq!(bin_age(18), "young_adult");
    assert_eq!(bin_age(25), "young_adult");
    assert_eq!(bin_age(26), "adult");
    assert_eq!(bin_age(35), "adult");
    assert_eq!(bin_age(36), "masters");
    assert_eq!(bin_age(45), "masters");
    assert_eq!(bin_age(46), "senior");
    assert_eq!(bin_age(70), "senior");
}

#[test]
fn test_experience_bucketization_boundaries() {
    assert_eq!(bin_experience(0), "novice");
    assert_eq!(bin_experience(2), "novice");
    assert_eq!(bin_experience(3), "intermediate");
    assert_eq!(bin_experience(5), "intermediate");
    assert_eq!(bin_experience(6), "advanced");
    assert_eq!(bin_experience(9), "advanced");
    assert_eq!(bin_experience(10), "expert");
    assert_eq!(bin_experience(25), "expert");
}

#[test]
fn test_empty_timeline_is_a_validation_error() {
    let timeline = Timeline::new(Vec::new()).unwrap();
    let result = assemble_features(&timeline, &test_profile(), 1);
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_first_week_still_produces_a_complete_vector() {
    let timeline = timeline_from_loads(&[20.0]);
    let features = assemble_features(&timeline, &test_profile(), 1).unwrap();

    assert_eq!(features.len(), 17);
    assert!((features.numeric("week_over_week_change")).abs() < 1e-12);
    assert!((features.numeric("monotony") - 1.0).abs() < 1e-12);
    assert!((features.numeric("distance_from_baseline")).abs() < 1e-12);
}

#[test]
fn test_timeline_rejects_duplicate_weeks() {
    let weeks = vec![
        TrainingWeek::new(1, 20.0, vec![5.0; 4]),
        TrainingWeek::new(1, 25.0, vec![5.0; 4]),
    ];
    assert!(matches!(
        Timeline::new(weeks),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_timeline_rejects_malformed_records() {
    assert!(Timeline::new(vec![TrainingWeek::new(0, 20.0, vec![5.0])]).is_err());
    assert!(Timeline::new(vec![TrainingWeek::new(1, 0.0, vec![5.0])]).is_err());
    assert!(Timeline::new(vec![TrainingWeek::new(1, -3.0, vec![5.0])]).is_err());
    assert!(Timeline::new(vec![TrainingWeek::new(1, 20.0, Vec::new())]).is_err());
}

#[test]
fn test_timeline_sorts_records_by_week() {
    let weeks = vec![
        TrainingWeek::new(3, 25.0, vec![5.0; 4]),
        TrainingWeek::new(1, 20.0, vec![5.0; 4]),
        TrainingWeek::new(2, 22.0, vec![5.0; 4]),
    ];
    let timeline = Timeline::new(weeks).unwrap();
    let ordered: Vec<u32> = timeline.records().iter().map(|w| w.week).collect();
    assert_eq!(ordered, vec![1, 2, 3]);
    assert_eq!(timeline.latest_week(), Some(3));
}
