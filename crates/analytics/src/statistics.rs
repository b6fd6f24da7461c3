use crate::error::AnalyticsError;
use core_types::{round2, values_of, Observation, Period, Statistics};
use tracing::debug;

/// Descriptive statistics over a series.
///
/// The standard deviation is the population form (divide by `n`). `change` compares
/// the last observation with the one before it. Every field is rounded exactly once,
/// here.
///
/// # Errors
///
/// `InsufficientData` for an empty series.
pub fn compute(series: &[Observation]) -> Result<Statistics, AnalyticsError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(AnalyticsError::InsufficientData(
                "statistics require at least one observation".to_string(),
            ));
        }
    };

    let n = series.len() as f64;
    let values = values_of(series);

    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let (change, change_percent) = match series.len() {
        0 | 1 => (0.0, 0.0),
        len => {
            let previous = series[len - 2].value;
            let change = last.value - previous;
            let pct = if previous != 0.0 { change / previous * 100.0 } else { 0.0 };
            (change, pct)
        }
    };

    debug!(data_points = series.len(), mean, variance, "Computed series statistics");

    Ok(Statistics {
        mean: round2(mean),
        median: round2(median),
        std_dev: round2(variance.sqrt()),
        min: round2(min),
        max: round2(max),
        latest: round2(last.value),
        change: round2(change),
        change_percent: round2(change_percent),
        data_points: series.len(),
        period: Period {
            start: first.date,
            end: last.date,
        },
    })
}
