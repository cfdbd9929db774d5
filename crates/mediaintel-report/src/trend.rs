//! Engagement trend classification.

use serde::Serialize;

/// Growth above this ratio of the first day counts as increasing.
const RISE_RATIO: f64 = 1.1;
/// Decline below this ratio of the first day counts as decreasing.
const FALL_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Classify chronologically ordered per-day totals by comparing the first and
/// last day. Fewer than two days is always `Stable`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn classify_trend(daily_totals: &[u64]) -> TrendDirection {
    let (Some(&first), Some(&last)) = (daily_totals.first(), daily_totals.last()) else {
        return TrendDirection::Stable;
    };
    if daily_totals.len() < 2 {
        return TrendDirection::Stable;
    }

    let first = first as f64;
    let last = last as f64;
    if last > first * RISE_RATIO {
        TrendDirection::Increasing
    } else if last < first * FALL_RATIO {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}
