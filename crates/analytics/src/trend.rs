use crate::regression;
use core_types::{
    round2, values_of, ChangeSeverity, Observation, SignificantChange, TrendAnalysis,
    TrendDirection,
};
use tracing::{debug, warn};

/// Only the most recent observations describe the current trend.
pub const TREND_WINDOW: usize = 12;
/// Below this many points no line is fitted.
pub const MIN_TREND_POINTS: usize = 3;

const SLOPE_THRESHOLD: f64 = 0.05;
const CHANGE_THRESHOLD: f64 = 0.5;
const SIGNIFICANT_THRESHOLD: f64 = 1.0;
const MAX_REPORTED_CHANGES: usize = 5;

/// Labels the recent direction of a series.
///
/// Fits a line through the last `TREND_WINDOW` points. Never fails: series shorter
/// than `MIN_TREND_POINTS` get `TrendAnalysis::insufficient()`.
pub fn analyze(series: &[Observation]) -> TrendAnalysis {
    if series.len() < MIN_TREND_POINTS {
        warn!(data_points = series.len(), "Series too short for trend analysis");
        return TrendAnalysis::insufficient();
    }

    let window = &series[series.len().saturating_sub(TREND_WINDOW)..];
    let values = values_of(window);
    let line = regression::fit(&values);

    let direction = if line.slope > SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if line.slope < -SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };
    // Labels are chosen on the unrounded scores.
    let strength = (line.slope.abs() * line.r_squared).min(1.0);
    let confidence = line.r_squared;

    debug!(
        window = window.len(),
        slope = line.slope,
        r_squared = line.r_squared,
        %direction,
        "Fitted trend line"
    );

    TrendAnalysis {
        direction,
        strength: round2(strength),
        confidence: round2(confidence),
        slope: round2(line.slope),
        description: describe(direction, strength, confidence),
        significant_changes: significant_changes(window),
    }
}

fn describe(direction: TrendDirection, strength: f64, confidence: f64) -> String {
    let strength_label = if strength > 0.7 {
        "strong"
    } else if strength > 0.4 {
        "moderate"
    } else {
        "weak"
    };
    let confidence_label = if confidence > 0.8 {
        "high"
    } else if confidence > 0.6 {
        "medium"
    } else {
        "low"
    };
    format!("{direction} trend, {strength_label} strength ({confidence_label} confidence)")
}

/// Point-to-point moves larger than `CHANGE_THRESHOLD`, most recent last.
fn significant_changes(window: &[Observation]) -> Vec<SignificantChange> {
    let mut changes: Vec<SignificantChange> = window
        .windows(2)
        .filter_map(|pair| {
            let delta = pair[1].value - pair[0].value;
            if delta.abs() <= CHANGE_THRESHOLD {
                return None;
            }
            let severity = if delta.abs() > SIGNIFICANT_THRESHOLD {
                ChangeSeverity::Significant
            } else {
                ChangeSeverity::Moderate
            };
            Some(SignificantChange {
                date: pair[1].date,
                value: round2(pair[1].value),
                change: round2(delta),
                severity,
            })
        })
        .collect();

    let excess = changes.len().saturating_sub(MAX_REPORTED_CHANGES);
    changes.drain(..excess);
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::IndicatorId;

    fn create_series(values: &[f64]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let date = start.checked_add_months(chrono::Months::new(i as u32)).unwrap();
                Observation::new(date, *v, IndicatorId::Unemployment)
            })
            .collect()
    }

    #[test]
    fn test_constant_series_is_stable_with_zero_strength() {
        let trend = analyze(&create_series(&[4.0; 10]));
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.strength, 0.0);
        assert_eq!(trend.confidence, 0.0);
        assert!(trend.significant_changes.is_empty());
        assert_eq!(trend.description, "stable trend, weak strength (low confidence)");
    }

    #[test]
    fn test_arithmetic_series_is_increasing_with_full_confidence() {
        let values: Vec<f64> = (0..20).map(|i| 1.0 + 0.2 * i as f64).collect();
        let trend = analyze(&create_series(&values));
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert_eq!(trend.confidence, 1.0);
        assert_eq!(trend.slope, 0.2);
        assert_eq!(trend.strength, 0.2);
        assert_eq!(trend.description, "increasing trend, weak strength (high confidence)");
    }

    #[test]
    fn test_steep_decline_is_strong() {
        let values: Vec<f64> = (0..6).map(|i| 10.0 - 0.8 * i as f64).collect();
        let trend = analyze(&create_series(&values));
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert_eq!(trend.strength, 0.8);
        assert!(trend.description.starts_with("decreasing trend, strong strength"));
        // 0.8 steps are moderate moves.
        assert_eq!(trend.significant_changes.len(), MAX_REPORTED_CHANGES);
        assert!(
            trend
                .significant_changes
                .iter()
                .all(|c| c.severity == ChangeSeverity::Moderate && c.change == -0.8)
        );
    }

    #[test]
    fn test_labels_use_unrounded_strength() {
        // Strength 0.7049 is published as 0.70 but still clears the 0.7 band.
        let values: Vec<f64> = (0..6).map(|i| 1.0 + 0.7049 * i as f64).collect();
        let trend = analyze(&create_series(&values));
        assert_eq!(trend.strength, 0.7);
        assert_eq!(trend.description, "increasing trend, strong strength (high confidence)");
        assert_eq!(describe(TrendDirection::Stable, 0.7, 0.8), "stable trend, moderate strength (medium confidence)");
    }

    #[test]
    fn test_short_series_returns_sentinel() {
        assert_eq!(analyze(&create_series(&[1.0, 5.0])), TrendAnalysis::insufficient());
        assert_eq!(analyze(&[]), TrendAnalysis::insufficient());
    }

    #[test]
    fn test_only_the_last_twelve_points_count() {
        // A steep early decline followed by twelve flat points.
        let mut values = vec![20.0, 15.0, 10.0, 5.0];
        values.extend(std::iter::repeat_n(3.0, 12));
        let trend = analyze(&create_series(&values));
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert!(trend.significant_changes.is_empty());
    }

    #[test]
    fn test_significant_changes_keep_the_most_recent_five() {
        let values = [1.0, 3.0, 1.0, 3.0, 1.0, 3.0, 3.6, 3.6];
        let trend = analyze(&create_series(&values));
        let changes = &trend.significant_changes;
        assert_eq!(changes.len(), 5);
        let last = changes.last().unwrap();
        assert_eq!(last.change, 0.6);
        assert_eq!(last.value, 3.6);
        assert_eq!(last.severity, ChangeSeverity::Moderate);
        assert!(changes[..4].iter().all(|c| c.severity == ChangeSeverity::Significant));
        assert_eq!(changes[0].change, -2.0);
    }
}
