use crate::error::AnalyzerError;
use crate::request::{
    check_confidence, check_periods, forecast_history, today, AnalysisRequest,
    AnalysisResponse, ForecastPlan, ForecastRequest,
};
use analytics::{confidence, forecast, statistics, trend};
use catalog::IndicatorCatalog;
use chrono::{NaiveDate, Utc};
use configuration::{AnalysisSettings, NoiseMode, Settings, FORECAST_PERIODS};
use core_types::{
    values_of, Frequency, ForecastPoint, ForecastResult, Indicator, IndicatorId,
    IndicatorSummary, Methodology, Observation,
};
use rayon::prelude::*;
use series::{NoisePolicy, SeriesProvider, SyntheticSeriesProvider};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// The single entry point the outer surfaces call.
///
/// Holds only read-only collaborators, so it is cheap to clone and safe to share
/// across threads. Every call validates its whole request before touching data.
#[derive(Clone)]
pub struct Analyzer {
    catalog: Arc<IndicatorCatalog>,
    provider: Arc<dyn SeriesProvider>,
    defaults: AnalysisSettings,
}

impl Analyzer {
    pub fn new(
        catalog: Arc<IndicatorCatalog>,
        provider: Arc<dyn SeriesProvider>,
        defaults: AnalysisSettings,
    ) -> Self {
        Self { catalog, provider, defaults }
    }

    /// The standard wiring: the built-in catalog feeding a synthetic provider whose
    /// noise policy comes from `settings.series`.
    pub fn from_settings(settings: &Settings) -> Self {
        let catalog = Arc::new(IndicatorCatalog::builtin());
        let policy = match settings.series.noise {
            NoiseMode::Seeded => NoisePolicy::Seeded { seed: settings.series.seed },
            NoiseMode::Entropy => NoisePolicy::Entropy,
        };
        let provider = SyntheticSeriesProvider::new(catalog.clone(), policy);
        Self::new(catalog, Arc::new(provider), settings.analysis.clone())
    }

    /// Active indicators, in catalog order.
    pub fn list_indicators(&self) -> Vec<Indicator> {
        self.catalog.list().into_iter().cloned().collect()
    }

    /// Runs the dashboard pipeline for one indicator: history, then the requested
    /// statistics, trend and forecast.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalyzerError> {
        let entry = self.catalog.get_by_str(&request.indicator)?;
        let plan = request.plan(entry.indicator.id, &self.defaults)?;

        info!(
            indicator = %plan.indicator,
            periods = plan.periods,
            forecast = plan.include_forecast,
            methodology = %plan.methodology,
            "Running analysis"
        );

        let history = self
            .provider
            .generate(plan.indicator, plan.periods, plan.end_date)?;
        let recent = since(&history, plan.start_date);

        let statistics = if plan.include_statistics {
            Some(statistics::compute(recent)?)
        } else {
            None
        };
        let trend = plan.include_trend.then(|| trend::analyze(recent));

        let (forecasts, accuracy) = if plan.include_forecast {
            let fit_length = plan.fit_length();
            let longer = if fit_length > plan.periods {
                Some(self.provider.generate(plan.indicator, fit_length, plan.end_date)?)
            } else {
                None
            };
            let fitted = longer.as_deref().unwrap_or(history.as_slice());
            let points = forecast_points(
                plan.indicator,
                fitted,
                plan.forecast_periods,
                entry.indicator.frequency,
                plan.confidence,
                plan.methodology,
            )?;
            (points, Some(confidence::accuracy(&values_of(fitted), plan.methodology)))
        } else {
            (Vec::new(), None)
        };

        Ok(AnalysisResponse {
            indicator: IndicatorSummary::from(&entry.indicator),
            historical_data: recent.to_vec(),
            statistics,
            trend,
            forecasts,
            accuracy,
        })
    }

    /// Forecasts one indicator from a history of `max(4 * periods, 24)` observations.
    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult, AnalyzerError> {
        let entry = self.catalog.get_by_str(&request.indicator)?;
        let plan = request.plan(entry.indicator.id, &self.defaults)?;
        self.run_forecast(&plan, entry.indicator.frequency)
    }

    fn run_forecast(
        &self,
        plan: &ForecastPlan,
        frequency: Frequency,
    ) -> Result<ForecastResult, AnalyzerError> {
        info!(
            indicator = %plan.indicator,
            periods = plan.periods,
            methodology = %plan.methodology,
            confidence = plan.confidence,
            "Generating forecast"
        );

        let history = self
            .provider
            .generate(plan.indicator, forecast_history(plan.periods), plan.end_date)?;
        let forecasts = forecast_points(
            plan.indicator,
            &history,
            plan.periods,
            frequency,
            plan.confidence,
            plan.methodology,
        )?;
        Ok(ForecastResult {
            indicator: plan.indicator,
            recent_history: tail(&history, plan.periods).to_vec(),
            forecasts,
            methodology: plan.methodology,
            accuracy: confidence::accuracy(&values_of(&history), plan.methodology),
            generated_at: Utc::now(),
            requested_periods: plan.periods,
            requested_confidence: plan.confidence,
        })
    }

    /// Forecasts several indicators in parallel with shared parameters.
    ///
    /// Parameters are validated once up front. Per-indicator failures (for example an
    /// unknown id) are logged and left out of the result rather than failing the batch.
    pub fn forecast_batch(
        &self,
        indicators: &[String],
        periods: Option<usize>,
        methodology: Option<Methodology>,
        confidence: Option<f64>,
        end_date: Option<NaiveDate>,
    ) -> Result<BTreeMap<IndicatorId, ForecastResult>, AnalyzerError> {
        let periods = check_periods(
            "periods",
            periods.unwrap_or(self.defaults.default_forecast_periods),
            &FORECAST_PERIODS,
        )?;
        let confidence = check_confidence(confidence.unwrap_or(self.defaults.default_confidence))?;
        let methodology = methodology.unwrap_or(self.defaults.default_methodology);
        let end_date = end_date.unwrap_or_else(today);

        info!(count = indicators.len(), periods, %methodology, "Running batch forecast");

        let results: BTreeMap<IndicatorId, ForecastResult> = indicators
            .par_iter()
            .filter_map(|id| {
                let outcome = self.catalog.get_by_str(id).map_err(AnalyzerError::from).and_then(|entry| {
                    let plan = ForecastPlan {
                        indicator: entry.indicator.id,
                        periods,
                        methodology,
                        confidence,
                        end_date,
                    };
                    self.run_forecast(&plan, entry.indicator.frequency)
                });
                match outcome {
                    Ok(result) => Some((result.indicator, result)),
                    Err(e) => {
                        warn!(indicator = %id, error = %e, "Batch forecast failed for indicator");
                        None
                    }
                }
            })
            .collect();

        Ok(results)
    }
}

/// Projects `periods` steps from `series` and dresses them as dated points with bands.
/// An empty series has no anchor date and yields no points.
fn forecast_points(
    indicator: IndicatorId,
    series: &[Observation],
    periods: usize,
    frequency: Frequency,
    confidence_level: f64,
    methodology: Methodology,
) -> Result<Vec<ForecastPoint>, AnalyzerError> {
    let raw = forecast::forecast(series, periods, methodology)?;
    let Some(last) = series.last() else {
        warn!(%indicator, "No history to anchor a forecast on");
        return Ok(Vec::new());
    };
    Ok(confidence::build_forecast_points(
        indicator,
        last.date,
        &raw,
        frequency,
        confidence_level,
        methodology,
    )?)
}

fn tail(series: &[Observation], n: usize) -> &[Observation] {
    &series[series.len().saturating_sub(n)..]
}

/// Observations dated on or after `start`. Series are sorted by date.
fn since(series: &[Observation], start: Option<NaiveDate>) -> &[Observation] {
    let from = start.map_or(0, |day| series.partition_point(|o| o.date < day));
    &series[from..]
}
