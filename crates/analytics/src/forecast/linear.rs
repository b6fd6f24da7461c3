use super::ForecastModel;
use crate::regression;

/// Extends the least-squares line through the whole history.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearTrend;

impl ForecastModel for LinearTrend {
    fn project(&self, values: &[f64], periods: usize) -> Vec<f64> {
        let line = regression::fit(values);
        let last_x = values.len() as f64 - 1.0;
        (1..=periods).map(|i| line.predict(last_x + i as f64)).collect()
    }
}
