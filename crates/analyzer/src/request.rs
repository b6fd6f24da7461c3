use crate::error::AnalyzerError;
use chrono::{NaiveDate, Utc};
use configuration::{AnalysisSettings, CONFIDENCE_LEVELS, FORECAST_PERIODS, HISTORY_PERIODS};
use core_types::{
    Accuracy, ForecastPoint, IndicatorId, IndicatorSummary, Methodology, Observation, Statistics,
    TrendAnalysis,
};
use serde::{Deserialize, Serialize};

/// A dashboard query for one indicator. Omitted fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub indicator: String,
    /// History length in periods.
    pub periods: Option<usize>,
    pub include_statistics: Option<bool>,
    pub include_trend: Option<bool>,
    pub include_forecast: Option<bool>,
    /// Forecast horizon in periods.
    pub forecast_periods: Option<usize>,
    pub methodology: Option<Methodology>,
    pub confidence: Option<f64>,
    /// Drops history dated before this day from the response.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AnalysisRequest {
    pub fn new(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub indicator: IndicatorSummary,
    pub historical_data: Vec<Observation>,
    pub statistics: Option<Statistics>,
    pub trend: Option<TrendAnalysis>,
    pub forecasts: Vec<ForecastPoint>,
    pub accuracy: Option<Accuracy>,
}

/// A dedicated forecast query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub indicator: String,
    /// Forecast horizon in periods.
    pub periods: Option<usize>,
    pub confidence: Option<f64>,
    pub methodology: Option<Methodology>,
    pub end_date: Option<NaiveDate>,
}

impl ForecastRequest {
    pub fn new(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            ..Self::default()
        }
    }
}

/// An `AnalysisRequest` with every default applied and every range checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AnalysisPlan {
    pub indicator: IndicatorId,
    pub periods: usize,
    pub include_statistics: bool,
    pub include_trend: bool,
    pub include_forecast: bool,
    pub forecast_periods: usize,
    pub methodology: Methodology,
    pub confidence: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
}

impl AnalysisPlan {
    /// Length of the series a forecast model is fitted on. This series is generated
    /// separately so the returned history never depends on the forecast flag.
    pub fn fit_length(&self) -> usize {
        self.periods.max(forecast_history(self.forecast_periods))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ForecastPlan {
    pub indicator: IndicatorId,
    pub periods: usize,
    pub methodology: Methodology,
    pub confidence: f64,
    pub end_date: NaiveDate,
}

/// History fitted for a forecast of `horizon` periods: four times the horizon, and
/// never less than two years of monthly data.
pub(crate) fn forecast_history(horizon: usize) -> usize {
    (horizon * 4).max(24)
}

pub(crate) fn check_periods(name: &str, value: usize, range: &std::ops::RangeInclusive<usize>) -> Result<usize, AnalyzerError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(AnalyzerError::invalid(
            name,
            format!("must be between {} and {}, got {value}", range.start(), range.end()),
        ))
    }
}

pub(crate) fn check_confidence(value: f64) -> Result<f64, AnalyzerError> {
    if CONFIDENCE_LEVELS.contains(&value) {
        Ok(value)
    } else {
        Err(AnalyzerError::invalid(
            "confidence",
            format!(
                "must be between {} and {}, got {value}",
                CONFIDENCE_LEVELS.start(),
                CONFIDENCE_LEVELS.end()
            ),
        ))
    }
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl AnalysisRequest {
    pub(crate) fn plan(
        &self,
        indicator: IndicatorId,
        defaults: &AnalysisSettings,
    ) -> Result<AnalysisPlan, AnalyzerError> {
        let end_date = self.end_date.unwrap_or_else(today);
        if let Some(start) = self.start_date.filter(|start| *start > end_date) {
            return Err(AnalyzerError::invalid(
                "startDate",
                format!("must not be after endDate ({end_date}), got {start}"),
            ));
        }
        Ok(AnalysisPlan {
            indicator,
            periods: check_periods(
                "periods",
                self.periods.unwrap_or(defaults.default_periods),
                &HISTORY_PERIODS,
            )?,
            include_statistics: self.include_statistics.unwrap_or(true),
            include_trend: self.include_trend.unwrap_or(true),
            include_forecast: self.include_forecast.unwrap_or(false),
            forecast_periods: check_periods(
                "forecastPeriods",
                self.forecast_periods.unwrap_or(defaults.default_forecast_periods),
                &FORECAST_PERIODS,
            )?,
            methodology: self.methodology.unwrap_or(defaults.default_methodology),
            confidence: check_confidence(self.confidence.unwrap_or(defaults.default_confidence))?,
            start_date: self.start_date,
            end_date,
        })
    }
}

impl ForecastRequest {
    pub(crate) fn plan(
        &self,
        indicator: IndicatorId,
        defaults: &AnalysisSettings,
    ) -> Result<ForecastPlan, AnalyzerError> {
        Ok(ForecastPlan {
            indicator,
            periods: check_periods(
                "periods",
                self.periods.unwrap_or(defaults.default_forecast_periods),
                &FORECAST_PERIODS,
            )?,
            methodology: self.methodology.unwrap_or(defaults.default_methodology),
            confidence: check_confidence(self.confidence.unwrap_or(defaults.default_confidence))?,
            end_date: self.end_date.unwrap_or_else(today),
        })
    }
}
