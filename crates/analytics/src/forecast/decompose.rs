use serde::{Deserialize, Serialize};

/// Widest centred moving-average window used for the trend component.
pub const TREND_WINDOW: usize = 5;

/// An additive split of a series into trend, seasonal and residual parts, each the
/// same length as the input (`value = trend + seasonal + residual`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Centred moving average with window `min(TREND_WINDOW, n)`. Near the edges the
/// window is shifted inward rather than shrunk at the start.
pub fn moving_average(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let w = TREND_WINDOW.min(n);
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(w / 2);
            let end = n.min(start + w);
            let window = &values[start..end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

/// Mean value at each position modulo `period`, minus the mean of those averages
/// taken over all `period` slots. Slots without observations average to `0` before
/// centring, so on a series shorter than one cycle they carry the negated centre.
pub fn seasonal_profile(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, v) in values.iter().enumerate() {
        sums[i % period] += v;
        counts[i % period] += 1;
    }

    let averages: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();
    let centre = averages.iter().sum::<f64>() / period as f64;

    averages.into_iter().map(|a| a - centre).collect()
}

/// Splits `values` into moving-average trend, seasonal profile of length `period`
/// and what is left over. A `period` of `0` is treated as `1` (no seasonality).
pub fn decompose(values: &[f64], period: usize) -> Decomposition {
    let trend = moving_average(values);
    let profile = seasonal_profile(values, period);
    let seasonal: Vec<f64> = (0..values.len()).map(|i| profile[i % profile.len()]).collect();
    let residual = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((v, t), s)| v - t - s)
        .collect();
    Decomposition { trend, seasonal, residual }
}
