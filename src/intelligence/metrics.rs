// ABOUTME: Causal workload metric library computing ACWR, monotony, strain, and trends
// ABOUTME: Every metric reads only weeks at or before the target week, never the future
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Causal per-week workload metrics.
//!
//! Each metric is a pure function of `(timeline, target_week)` and is
//! forbidden from reading any week greater than the target. Missing history
//! never raises: every metric degrades to a documented neutral or zero value
//! so a complete feature vector is producible even for an athlete's first
//! recorded week.
//!
//! Windows slide over *recorded* weeks (positions in the ordered timeline),
//! not calendar week numbers, so gaps in the history shrink toward the most
//! recent records rather than padding with zeros.

use crate::models::Timeline;

/// Chronic load and monotony window: 4 most recent recorded weeks
pub const CHRONIC_WINDOW_WEEKS: usize = 4;

/// ACWR trend window: slope over the last 2 recorded weeks
pub const TREND_WINDOW_WEEKS: usize = 2;

/// ACWR threshold for the consecutive-weeks-above streak
pub const ACWR_STREAK_THRESHOLD: f64 = 1.3;

/// Personal baseline window: median over up to 12 prior recorded weeks
pub const BASELINE_WINDOW_WEEKS: usize = 12;

/// Recent-injury lookback window in recorded weeks
pub const INJURY_WINDOW_WEEKS: usize = 8;

/// Neutral monotony when the window has too little variation to measure
const NEUTRAL_MONOTONY: f64 = 1.0;

/// Acute load: the target week's recorded load, or 0.0 if absent.
#[must_use]
pub fn acute_load(timeline: &Timeline, week: u32) -> f64 {
    timeline.get(week).map_or(0.0, |w| w.weekly_load)
}

/// Chronic load: mean load over up to `window` most recent recorded weeks
/// ending at the target week inclusive. 0.0 if the target week is absent.
#[must_use]
pub fn chronic_load(timeline: &Timeline, week: u32, window: usize) -> f64 {
    let Some(slice) = trailing_window(timeline, week, window) else {
        return 0.0;
    };
    mean(&slice)
}

/// Acute:Chronic Workload Ratio. Defined as 0.0 when chronic load is zero,
/// never NaN.
#[must_use]
pub fn acwr(timeline: &Timeline, week: u32) -> f64 {
    let chronic = chronic_load(timeline, week, CHRONIC_WINDOW_WEEKS);
    if chronic == 0.0 {
        return 0.0;
    }
    acute_load(timeline, week) / chronic
}

/// Training monotony: mean / sample standard deviation of load over the
/// trailing window. Returns the neutral value 1.0 when fewer than 2 samples
/// exist or the window has zero variation.
#[must_use]
pub fn monotony(timeline: &Timeline, week: u32, window: usize) -> f64 {
    let Some(slice) = trailing_window(timeline, week, window) else {
        return NEUTRAL_MONOTONY;
    };
    if slice.len() < 2 {
        return NEUTRAL_MONOTONY;
    }

    let mean_load = mean(&slice);
    let std_load = sample_std(&slice, mean_load);
    if std_load == 0.0 {
        return NEUTRAL_MONOTONY;
    }
    mean_load / std_load
}

/// Training strain: weekly load times monotony. 0.0 if the target week is
/// absent.
#[must_use]
pub fn strain(timeline: &Timeline, week: u32) -> f64 {
    let Some(record) = timeline.get(week) else {
        return 0.0;
    };
    record.weekly_load * monotony(timeline, week, CHRONIC_WINDOW_WEEKS)
}

/// Week-over-week percentage change in load. 0.0 when the previous calendar
/// week is absent (including the first week of any timeline) or had zero
/// load.
#[must_use]
pub fn week_over_week_change(timeline: &Timeline, week: u32) -> f64 {
    let Some(current) = timeline.get(week) else {
        return 0.0;
    };
    if week <= 1 {
        return 0.0;
    }
    let Some(previous) = timeline.get(week - 1) else {
        return 0.0;
    };
    if previous.weekly_load == 0.0 {
        return 0.0;
    }
    ((current.weekly_load - previous.weekly_load) / previous.weekly_load) * 100.0
}

/// ACWR trend: ordinary least-squares slope of ACWR over the trailing window
/// (x is the relative index within the window). Positive values move toward
/// the danger zone. 0.0 with fewer than 2 points.
#[must_use]
pub fn acwr_trend(timeline: &Timeline, week: u32, window: usize) -> f64 {
    let Some(position) = timeline.position(week) else {
        return 0.0;
    };
    let start = position.saturating_sub(window.saturating_sub(1));
    let records = &timeline.records()[start..=position];
    if records.len() < 2 {
        return 0.0;
    }

    let values: Vec<f64> = records.iter().map(|r| acwr(timeline, r.week)).collect();
    ols_slope(&values)
}

/// Count of consecutive recorded weeks ending at the target week whose ACWR
/// exceeds `threshold`, scanning backward and stopping at the first week
/// that does not.
#[must_use]
pub fn weeks_above_threshold(timeline: &Timeline, week: u32, threshold: f64) -> u32 {
    let Some(position) = timeline.position(week) else {
        return 0;
    };

    let mut count = 0;
    for record in timeline.records()[..=position].iter().rev() {
        if acwr(timeline, record.week) > threshold {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Percentage difference between the target week's load and the median load
/// of up to `baseline_window` recorded weeks strictly before it. 0.0 when no
/// prior weeks exist or the baseline is zero.
#[must_use]
pub fn distance_from_baseline(timeline: &Timeline, week: u32, baseline_window: usize) -> f64 {
    let Some(position) = timeline.position(week) else {
        return 0.0;
    };
    let current_load = timeline.records()[position].weekly_load;

    let start = position.saturating_sub(baseline_window);
    let prior = &timeline.records()[start..position];
    if prior.is_empty() {
        return 0.0;
    }

    let loads: Vec<f64> = prior.iter().map(|r| r.weekly_load).collect();
    let baseline = median(&loads);
    if baseline == 0.0 {
        return 0.0;
    }
    ((current_load - baseline) / baseline) * 100.0
}

/// Lagged ACWR: the ACWR `lag_weeks` calendar weeks before the target, or
/// 0.0 when that week would fall before week 1.
#[must_use]
pub fn lagged_acwr(timeline: &Timeline, week: u32, lag_weeks: u32) -> f64 {
    if week <= lag_weeks {
        return 0.0;
    }
    acwr(timeline, week - lag_weeks)
}

/// 1.0 if any recorded week strictly before the target, within the trailing
/// `window`, carries an injury flag; else 0.0. Always 0.0 in pure-inference
/// payloads, which carry no historical labels.
#[must_use]
pub fn recent_injury(timeline: &Timeline, week: u32, window: usize) -> f64 {
    let Some(position) = timeline.position(week) else {
        return 0.0;
    };
    let start = position.saturating_sub(window);
    let prior = &timeline.records()[start..position];
    if prior.iter().any(|r| r.injured) {
        1.0
    } else {
        0.0
    }
}

/// Workload metric calculator with configurable windows.
///
/// The free functions above use the standard sports-science windows; this
/// calculator exists for callers that need non-standard ones.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadCalculator {
    chronic_window: usize,
    trend_window: usize,
    baseline_window: usize,
    injury_window: usize,
    streak_threshold: f64,
}

impl Default for WorkloadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkloadCalculator {
    /// Create a calculator with the standard windows
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chronic_window: CHRONIC_WINDOW_WEEKS,
            trend_window: TREND_WINDOW_WEEKS,
            baseline_window: BASELINE_WINDOW_WEEKS,
            injury_window: INJURY_WINDOW_WEEKS,
            streak_threshold: ACWR_STREAK_THRESHOLD,
        }
    }

    /// Create a calculator with custom chronic and trend windows
    #[must_use]
    pub const fn with_windows(chronic_window: usize, trend_window: usize) -> Self {
        Self {
            chronic_window,
            trend_window,
            baseline_window: BASELINE_WINDOW_WEEKS,
            injury_window: INJURY_WINDOW_WEEKS,
            streak_threshold: ACWR_STREAK_THRESHOLD,
        }
    }

    /// Acute load at the target week
    #[must_use]
    pub fn acute_load(&self, timeline: &Timeline, week: u32) -> f64 {
        acute_load(timeline, week)
    }

    /// Chronic load over this calculator's window
    #[must_use]
    pub fn chronic_load(&self, timeline: &Timeline, week: u32) -> f64 {
        chronic_load(timeline, week, self.chronic_window)
    }

    /// ACWR using this calculator's chronic window
    #[must_use]
    pub fn acwr(&self, timeline: &Timeline, week: u32) -> f64 {
        let chronic = self.chronic_load(timeline, week);
        if chronic == 0.0 {
            return 0.0;
        }
        acute_load(timeline, week) / chronic
    }

    /// Monotony over this calculator's window
    #[must_use]
    pub fn monotony(&self, timeline: &Timeline, week: u32) -> f64 {
        monotony(timeline, week, self.chronic_window)
    }

    /// ACWR trend over this calculator's trend window
    #[must_use]
    pub fn acwr_trend(&self, timeline: &Timeline, week: u32) -> f64 {
        acwr_trend(timeline, week, self.trend_window)
    }

    /// Consecutive weeks above this calculator's streak threshold
    #[must_use]
    pub fn weeks_above_threshold(&self, timeline: &Timeline, week: u32) -> u32 {
        weeks_above_threshold(timeline, week, self.streak_threshold)
    }

    /// Distance from personal baseline over this calculator's window
    #[must_use]
    pub fn distance_from_baseline(&self, timeline: &Timeline, week: u32) -> f64 {
        distance_from_baseline(timeline, week, self.baseline_window)
    }

    /// Recent injury indicator over this calculator's window
    #[must_use]
    pub fn recent_injury(&self, timeline: &Timeline, week: u32) -> f64 {
        recent_injury(timeline, week, self.injury_window)
    }
}

/// Trailing window of weekly loads ending at the target week inclusive.
/// None if the target week is not recorded.
fn trailing_window(timeline: &Timeline, week: u32, window: usize) -> Option<Vec<f64>> {
    let position = timeline.position(week)?;
    let start = position.saturating_sub(window.saturating_sub(1));
    Some(
        timeline.records()[start..=position]
            .iter()
            .map(|r| r.weekly_load)
            .collect(),
    )
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1), matching the training pipeline
fn sample_std(values: &[f64], mean_value: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean_value).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// OLS slope of `values` against their indices 0..n
fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}
