use super::decompose::{moving_average, seasonal_profile};
use super::ForecastModel;
use crate::regression;

/// Seasonal cycle length, in periods.
pub const SEASON_LENGTH: usize = 12;
/// How many trailing trend values set the projected slope.
pub const SLOPE_LOOKBACK: usize = 6;

/// A simplified additive trend + seasonality model in the spirit of Prophet.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendSeasonal;

impl ForecastModel for TrendSeasonal {
    fn project(&self, values: &[f64], periods: usize) -> Vec<f64> {
        let trend = moving_average(values);
        let Some(&trend_last) = trend.last() else {
            return Vec::new();
        };
        let seasonal = seasonal_profile(values, SEASON_LENGTH);
        let slope = regression::slope(&trend[trend.len().saturating_sub(SLOPE_LOOKBACK)..]);

        let n = values.len();
        (1..=periods)
            .map(|i| trend_last + slope * i as f64 + seasonal[(n + i - 1) % SEASON_LENGTH])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pure_seasonal_pattern_repeats() {
        // Two full years of a saw-tooth with no trend.
        let values: Vec<f64> = (0..24).map(|i| 3.0 + (i % 12) as f64 * 0.1).collect();
        let out = TrendSeasonal.project(&values, 12);
        assert_eq!(out.len(), 12);
        // The forecast keeps the shape of the cycle: position 0 lowest, 11 highest.
        let low = out[0];
        let high = out[11];
        assert!(high - low > 0.9);
    }

    #[test]
    fn test_linear_history_keeps_its_slope() {
        let values: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let out = TrendSeasonal.project(&values, 2);
        // Seasonal profile of a 12-point ramp is the ramp minus its mean.
        let trend = moving_average(&values);
        let slope = regression::slope(&trend[6..]);
        assert_relative_eq!(out[0], trend[11] + slope + (0.0 - 5.5), epsilon = 1e-9);
        assert_relative_eq!(out[1], trend[11] + 2.0 * slope + (1.0 - 5.5), epsilon = 1e-9);
    }
}
