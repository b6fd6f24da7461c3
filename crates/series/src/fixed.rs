use crate::error::SeriesError;
use crate::SeriesProvider;
use chrono::NaiveDate;
use core_types::{IndicatorId, Observation};
use std::collections::HashMap;

/// Serves caller-supplied observations, e.g. a real data extract or a test fixture.
///
/// `generate` returns the most recent `periods` observations dated on or before
/// `end_date`, so it can return fewer than requested.
#[derive(Debug, Clone, Default)]
pub struct StaticSeriesProvider {
    series: HashMap<IndicatorId, Vec<Observation>>,
}

impl StaticSeriesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the series for `indicator`. Observations are sorted
    /// by date and re-tagged with `indicator`.
    pub fn with_series(mut self, indicator: IndicatorId, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        for obs in &mut observations {
            obs.indicator = indicator;
        }
        self.series.insert(indicator, observations);
        self
    }
}

impl SeriesProvider for StaticSeriesProvider {
    fn generate(
        &self,
        indicator: IndicatorId,
        periods: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<Observation>, SeriesError> {
        let all = self
            .series
            .get(&indicator)
            .ok_or_else(|| SeriesError::IndicatorNotFound(indicator.to_string()))?;
        let visible = all.partition_point(|o| o.date <= end_date);
        let start = visible.saturating_sub(periods);
        Ok(all[start..visible].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, value: f64) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), value, IndicatorId::Gdp)
    }

    #[test]
    fn test_returns_trailing_window_up_to_end_date() {
        let provider = StaticSeriesProvider::new().with_series(
            IndicatorId::Cpi,
            vec![obs(3, 3.0), obs(1, 1.0), obs(2, 2.0), obs(4, 4.0)],
        );
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

        let window = provider.generate(IndicatorId::Cpi, 2, end).unwrap();
        assert_eq!(window.iter().map(|o| o.value).collect::<Vec<_>>(), vec![2.0, 3.0]);
        assert!(window.iter().all(|o| o.indicator == IndicatorId::Cpi));

        let all = provider.generate(IndicatorId::Cpi, 10, end).unwrap();
        assert_eq!(all.len(), 3);
        assert!(provider.generate(IndicatorId::Cpi, 0, end).unwrap().is_empty());
    }

    #[test]
    fn test_missing_indicator_is_not_found() {
        let provider = StaticSeriesProvider::new();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert!(matches!(
            provider.generate(IndicatorId::Gdp, 1, end),
            Err(SeriesError::IndicatorNotFound(_))
        ));
    }
}
