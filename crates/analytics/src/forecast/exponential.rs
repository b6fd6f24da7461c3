use super::ForecastModel;

/// Smoothing factor applied to each new observation.
pub const ALPHA: f64 = 0.3;

/// Simple exponential smoothing with the latest first difference carried forward as
/// the trend.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExponentialSmoothing;

impl ForecastModel for ExponentialSmoothing {
    fn project(&self, values: &[f64], periods: usize) -> Vec<f64> {
        let Some((&first, rest)) = values.split_first() else {
            return Vec::new();
        };
        let level = rest.iter().fold(first, |s, v| ALPHA * v + (1.0 - ALPHA) * s);
        let trend = match values {
            [.., prev, last] => last - prev,
            _ => 0.0,
        };
        (1..=periods).map(|i| level + trend * i as f64).collect()
    }
}
