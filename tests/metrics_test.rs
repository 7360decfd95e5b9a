// ABOUTME: Integration tests for the causal workload metric library
// ABOUTME: Covers causality, degradation defaults, and known metric values
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use strideguard::intelligence::metrics::{
    acute_load, acwr, acwr_trend, chronic_load, distance_from_baseline, lagged_acwr, monotony,
    recent_injury, strain, week_over_week_change, weeks_above_threshold, WorkloadCalculator,
};
use strideguard::models::{Timeline, TrainingWeek};

/// Build a timeline with the given weekly loads at weeks 1..=n
fn timeline_from_loads(loads: &[f64]) -> Timeline {
    let weeks = loads
        .iter()
        .enumerate()
        .map(|(i, &load)| TrainingWeek::new(i as u32 + 1, load, vec![load / 4.0; 4]))
        .collect();
    Timeline::new(weeks).unwrap()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_chronic_load_and_acwr_reference_values() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);

    assert_close(acute_load(&timeline, 5), 35.0, 1e-9);
    // Trailing 4-week window at week 5: (22 + 25 + 30 + 35) / 4
    assert_close(chronic_load(&timeline, 5, 4), 28.0, 1e-9);
    assert_close(acwr(&timeline, 5), 35.0 / 28.0, 1e-9);
}

#[test]
fn test_chronic_load_short_history_uses_fewer_weeks() {
    let timeline = timeline_from_loads(&[20.0, 30.0]);
    // Only two weeks exist, so the window shrinks
    assert_close(chronic_load(&timeline, 2, 4), 25.0, 1e-9);
}

#[test]
fn test_causality_future_weeks_never_change_past_metrics() {
    let past = timeline_from_loads(&[20.0, 22.0, 25.0]);
    let extended = timeline_from_loads(&[20.0, 22.0, 25.0, 90.0, 5.0]);

    for week in 1..=3 {
        assert_close(acute_load(&past, week), acute_load(&extended, week), 1e-12);
        assert_close(
            chronic_load(&past, week, 4),
            chronic_load(&extended, week, 4),
            1e-12,
        );
        assert_close(acwr(&past, week), acwr(&extended, week), 1e-12);
        assert_close(
            monotony(&past, week, 4),
            monotony(&extended, week, 4),
            1e-12,
        );
        assert_close(strain(&past, week), strain(&extended, week), 1e-12);
        assert_close(
            week_over_week_change(&past, week),
            week_over_week_change(&extended, week),
            1e-12,
        );
        assert_close(
            acwr_trend(&past, week, 2),
            acwr_trend(&extended, week, 2),
            1e-12,
        );
        assert_eq!(
            weeks_above_threshold(&past, week, 1.3),
            weeks_above_threshold(&extended, week, 1.3)
        );
        assert_close(
            distance_from_baseline(&past, week, 12),
            distance_from_baseline(&extended, week, 12),
            1e-12,
        );
    }
}

#[test]
fn test_acwr_zero_chronic_guard() {
    let timeline = timeline_from_loads(&[20.0, 22.0]);
    // Week 9 is absent, so acute and chronic are both zero
    let value = acwr(&timeline, 9);
    assert!(value.is_finite());
    assert_close(value, 0.0, 1e-12);
}

#[test]
fn test_monotony_neutral_with_single_sample() {
    let timeline = timeline_from_loads(&[20.0]);
    assert_close(monotony(&timeline, 1, 4), 1.0, 1e-12);
}

#[test]
fn test_monotony_neutral_with_zero_variation() {
    let timeline = timeline_from_loads(&[25.0, 25.0, 25.0, 25.0]);
    assert_close(monotony(&timeline, 4, 4), 1.0, 1e-12);
}

#[test]
fn test_monotony_sample_stddev() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0]);
    // mean 24.25, sample std (ddof=1) ~= 4.34933
    assert_close(monotony(&timeline, 4, 4), 24.25 / 4.349_329_450_233_296, 1e-9);
}

#[test]
fn test_strain_is_load_times_monotony() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0]);
    let expected = 30.0 * monotony(&timeline, 4, 4);
    assert_close(strain(&timeline, 4), expected, 1e-9);
    // Absent week degrades to zero
    assert_close(strain(&timeline, 11), 0.0, 1e-12);
}

#[test]
fn test_week_over_week_change_first_week_is_zero() {
    let timeline = timeline_from_loads(&[20.0, 26.0]);
    assert_close(week_over_week_change(&timeline, 1), 0.0, 1e-12);
    assert_close(week_over_week_change(&timeline, 2), 30.0, 1e-9);
}

#[test]
fn test_acwr_trend_matches_two_point_slope() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    let expected = acwr(&timeline, 5) - acwr(&timeline, 4);
    assert_close(acwr_trend(&timeline, 5, 2), expected, 1e-9);
}

#[test]
fn test_acwr_trend_single_point_is_zero() {
    let timeline = timeline_from_loads(&[20.0]);
    assert_close(acwr_trend(&timeline, 1, 2), 0.0, 1e-12);
}

#[test]
fn test_weeks_above_threshold_counts_consecutive_streak() {
    let timeline = timeline_from_loads(&[10.0, 10.0, 10.0, 30.0, 40.0]);

    // Week 4: acwr = 30 / 15 = 2.0; week 5: acwr = 40 / 22.5 ~= 1.78
    assert_eq!(weeks_above_threshold(&timeline, 5, 1.3), 2);
    assert_eq!(weeks_above_threshold(&timeline, 4, 1.3), 1);
    // Week 3 sits at acwr 1.0, below the threshold: the streak resets
    assert_eq!(weeks_above_threshold(&timeline, 3, 1.3), 0);
}

#[test]
fn test_distance_from_baseline_median_of_prior_weeks() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    // Prior loads [20, 22, 25, 30], median 23.5
    let expected = (35.0 - 23.5) / 23.5 * 100.0;
    assert_close(distance_from_baseline(&timeline, 5, 12), expected, 1e-9);
    // First week has no history
    assert_close(distance_from_baseline(&timeline, 1, 12), 0.0, 1e-12);
}

#[test]
fn test_lagged_acwr() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    assert_close(lagged_acwr(&timeline, 5, 1), acwr(&timeline, 4), 1e-12);
    assert_close(lagged_acwr(&timeline, 5, 2), acwr(&timeline, 3), 1e-12);
    // Lag falling before week 1 degrades to zero
    assert_close(lagged_acwr(&timeline, 1, 1), 0.0, 1e-12);
    assert_close(lagged_acwr(&timeline, 2, 2), 0.0, 1e-12);
}

#[test]
fn test_recent_injury_looks_strictly_backward() {
    let mut weeks: Vec<TrainingWeek> = (1..=5)
        .map(|w| TrainingWeek::new(w, 20.0, vec![5.0; 4]))
        .collect();
    weeks[2].injured = true; // week 3

    let timeline = Timeline::new(weeks).unwrap();
    assert_close(recent_injury(&timeline, 5, 8), 1.0, 1e-12);
    assert_close(recent_injury(&timeline, 4, 8), 1.0, 1e-12);
    // The flagged week itself does not count at its own week
    assert_close(recent_injury(&timeline, 3, 8), 0.0, 1e-12);
}

#[test]
fn test_recent_injury_pure_inference_is_zero() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0]);
    assert_close(recent_injury(&timeline, 3, 8), 0.0, 1e-12);
}

#[test]
fn test_workload_calculator_matches_free_functions() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    let calculator = WorkloadCalculator::new();

    assert_close(calculator.acwr(&timeline, 5), acwr(&timeline, 5), 1e-12);
    assert_close(
        calculator.chronic_load(&timeline, 5),
        chronic_load(&timeline, 5, 4),
        1e-12,
    );
    assert_eq!(
        calculator.weeks_above_threshold(&timeline, 5),
        weeks_above_threshold(&timeline, 5, 1.3)
    );
}

#[test]
fn test_workload_calculator_custom_windows() {
    let timeline = timeline_from_loads(&[20.0, 22.0, 25.0, 30.0, 35.0]);
    let calculator = WorkloadCalculator::with_windows(2, 2);
    // Chronic over the last 2 recorded weeks: (30 + 35) / 2
    assert_close(calculator.chronic_load(&timeline, 5), 32.5, 1e-9);
}
