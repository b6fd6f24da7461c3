//! Confidence bands around forecast points and the synthetic accuracy score.

use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{
    round2, Accuracy, ConfidenceBand, ForecastPoint, Frequency, IndicatorId, Methodology,
};

const BASE_MARGIN: f64 = 0.05;
const HORIZON_GROWTH: f64 = 0.1;
/// History length at which a series counts as complete.
const COMPLETE_HISTORY: f64 = 24.0;

/// Half-width of the band around `value` at forecast step `horizon` (1-based).
///
/// `confidence` is the caller's requested confidence level, but it enters as
/// `(2 - confidence)`: a higher requested confidence gives a *narrower* band. This is
/// the inverse of a statistical confidence interval and is kept for compatibility
/// with existing consumers of the band.
pub fn margin(value: f64, confidence: f64, horizon: usize) -> f64 {
    let steps_out = horizon.saturating_sub(1) as f64;
    value.abs() * BASE_MARGIN * (1.0 + steps_out * HORIZON_GROWTH) * (2.0 - confidence)
}

pub fn bound(value: f64, confidence: f64, horizon: usize) -> ConfidenceBand {
    let m = margin(value, confidence, horizon);
    ConfidenceBand {
        lower: round2(value - m),
        upper: round2(value + m),
    }
}

fn base_accuracy(methodology: Methodology) -> Accuracy {
    match methodology {
        Methodology::Linear => Accuracy { mape: 8.5, rmse: 0.15 },
        Methodology::Exponential => Accuracy { mape: 7.2, rmse: 0.12 },
        Methodology::Arima => Accuracy { mape: 6.8, rmse: 0.11 },
        Methodology::Prophet => Accuracy { mape: 6.2, rmse: 0.10 },
    }
}

/// Data quality in `[0, 1]`: the mean of history completeness and value consistency
/// (one minus the coefficient of variation, floored at zero).
pub fn data_quality(values: &[f64]) -> f64 {
    let completeness = (values.len() as f64 / COMPLETE_HISTORY).min(1.0);

    let consistency = if values.is_empty() {
        0.0
    } else {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        if mean == 0.0 {
            0.0
        } else {
            (1.0 - std_dev / mean.abs()).max(0.0)
        }
    };

    (completeness + consistency) / 2.0
}

/// A per-methodology accuracy proxy scaled by the quality of the history.
///
/// This is not a back-tested error measurement: it is a fixed baseline for the
/// methodology multiplied by `0.8 + 0.4 * data_quality`.
pub fn accuracy(values: &[f64], methodology: Methodology) -> Accuracy {
    let base = base_accuracy(methodology);
    let factor = 0.8 + 0.4 * data_quality(values);
    Accuracy {
        mape: round2(base.mape * factor),
        rmse: round2(base.rmse * factor),
    }
}

/// Turns raw projected values into dated, rounded `ForecastPoint`s with bands.
///
/// Step `i` is dated `i` frequency periods after `last_date`.
pub fn build_forecast_points(
    indicator: IndicatorId,
    last_date: NaiveDate,
    values: &[f64],
    frequency: Frequency,
    confidence: f64,
    methodology: Methodology,
) -> Result<Vec<ForecastPoint>, AnalyticsError> {
    values
        .iter()
        .enumerate()
        .map(|(i, &raw)| {
            let horizon = i + 1;
            let date = i64::try_from(horizon)
                .ok()
                .and_then(|steps| frequency.shift(last_date, steps))
                .ok_or_else(|| {
                    AnalyticsError::invalid("end_date", "forecast dates fall outside the calendar range")
                })?;
            Ok(ForecastPoint {
                date,
                value: round2(raw),
                indicator,
                confidence: bound(raw, confidence, horizon),
                methodology,
                predicted: true,
            })
        })
        .collect()
}
