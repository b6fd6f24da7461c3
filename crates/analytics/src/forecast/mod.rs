//! Point forecasts for a single series.
//!
//! Each methodology is a `ForecastModel`; `forecast` validates the horizon, handles
//! the short-series cases once for every model, and dispatches through `MODELS`.

pub mod arima;
pub mod decompose;
pub mod exponential;
pub mod linear;
pub mod prophet;

pub use arima::Autoregressive;
pub use decompose::{decompose, Decomposition};
pub use exponential::ExponentialSmoothing;
pub use linear::LinearTrend;
pub use prophet::TrendSeasonal;

use crate::error::AnalyticsError;
use core_types::{values_of, Methodology, Observation};
use tracing::debug;

/// Longest horizon a single forecast may request.
pub const MAX_FORECAST_PERIODS: usize = 24;

/// A forecasting methodology.
///
/// `project` receives at least two values and returns exactly `periods` raw
/// (unrounded) predictions for the steps after the last value.
pub trait ForecastModel: Send + Sync {
    fn project(&self, values: &[f64], periods: usize) -> Vec<f64>;
}

static MODELS: [(Methodology, &dyn ForecastModel); 4] = [
    (Methodology::Linear, &LinearTrend),
    (Methodology::Exponential, &ExponentialSmoothing),
    (Methodology::Arima, &Autoregressive),
    (Methodology::Prophet, &TrendSeasonal),
];

/// The model registered for `methodology`, or the linear model if none is.
pub fn model_for(methodology: Methodology) -> &'static dyn ForecastModel {
    MODELS
        .iter()
        .find(|(m, _)| *m == methodology)
        .map_or(&LinearTrend as &'static dyn ForecastModel, |(_, model)| *model)
}

/// Forecasts `periods` future values of `series`.
///
/// An empty series yields an empty forecast; a single observation is repeated.
///
/// # Errors
///
/// `InvalidParameter` when `periods` is outside `1..=MAX_FORECAST_PERIODS`.
pub fn forecast(
    series: &[Observation],
    periods: usize,
    methodology: Methodology,
) -> Result<Vec<f64>, AnalyticsError> {
    let values = values_of(series);
    forecast_values(&values, periods, methodology)
}

/// As `forecast`, over bare values.
pub fn forecast_values(
    values: &[f64],
    periods: usize,
    methodology: Methodology,
) -> Result<Vec<f64>, AnalyticsError> {
    if !(1..=MAX_FORECAST_PERIODS).contains(&periods) {
        return Err(AnalyticsError::invalid(
            "periods",
            format!("must be between 1 and {MAX_FORECAST_PERIODS}, got {periods}"),
        ));
    }

    let projected = match values {
        [] => Vec::new(),
        [only] => vec![*only; periods],
        _ => model_for(methodology).project(values, periods),
    };

    debug!(
        %methodology,
        history = values.len(),
        periods,
        "Projected forecast values"
    );
    Ok(projected)
}
