use crate::enums::{ChangeSeverity, Frequency, IndicatorId, Methodology, TrendDirection};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==============================================================================
// Indicator metadata
// ==============================================================================

/// Static metadata describing one economic indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub id: IndicatorId,
    pub name: String,
    pub name_en: String,
    pub unit: String,
    pub frequency: Frequency,
    pub source: String,
    pub category: String,
    pub description: String,
    pub is_active: bool,
}

/// The slim view of an indicator embedded in analysis responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub id: IndicatorId,
    pub name: String,
    pub unit: String,
    pub frequency: Frequency,
    pub source: String,
}

impl From<&Indicator> for IndicatorSummary {
    fn from(indicator: &Indicator) -> Self {
        Self {
            id: indicator.id,
            name: indicator.name.clone(),
            unit: indicator.unit.clone(),
            frequency: indicator.frequency,
            source: indicator.source.clone(),
        }
    }
}

// ==============================================================================
// Observations
// ==============================================================================

/// A single dated value of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    pub indicator: IndicatorId,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64, indicator: IndicatorId) -> Self {
        Self { date, value, indicator }
    }
}

/// Extracts the raw values of a series in order.
pub fn values_of(series: &[Observation]) -> Vec<f64> {
    series.iter().map(|o| o.value).collect()
}

// ==============================================================================
// Statistics
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Descriptive statistics over a series. Every number is already rounded to two
/// decimals; consumers must not round again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub latest: f64,
    pub change: f64,
    pub change_percent: f64,
    pub data_points: usize,
    pub period: Period,
}

// ==============================================================================
// Trend
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantChange {
    pub date: NaiveDate,
    pub value: f64,
    pub change: f64,
    pub severity: ChangeSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    /// In `[0, 1]`; combines slope magnitude and fit quality.
    pub strength: f64,
    /// Coefficient of determination of the fitted line, in `[0, 1]`.
    pub confidence: f64,
    /// Native units per period.
    pub slope: f64,
    pub description: String,
    pub significant_changes: Vec<SignificantChange>,
}

impl TrendAnalysis {
    /// The "no signal" answer returned for series too short to fit a line.
    pub fn insufficient() -> Self {
        Self {
            direction: TrendDirection::Stable,
            strength: 0.0,
            confidence: 0.0,
            slope: 0.0,
            description: "insufficient data".to_string(),
            significant_changes: Vec::new(),
        }
    }
}

// ==============================================================================
// Forecasts
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceBand {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub indicator: IndicatorId,
    pub confidence: ConfidenceBand,
    pub methodology: Methodology,
    pub predicted: bool,
}

/// Synthetic accuracy proxy. Not a back-tested measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    pub mape: f64,
    pub rmse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub indicator: IndicatorId,
    pub recent_history: Vec<Observation>,
    pub forecasts: Vec<ForecastPoint>,
    pub methodology: Methodology,
    pub accuracy: Accuracy,
    pub generated_at: DateTime<Utc>,
    pub requested_periods: usize,
    pub requested_confidence: f64,
}
