use crate::error::NarrativeError;
use crate::{Narrative, Narrator};
use analyzer::AnalysisResponse;
use async_trait::async_trait;
use core_types::ForecastPoint;
use tracing::debug;

const TEMPLATE_CONFIDENCE: f64 = 0.75;

/// Fills a fixed English template from the numbers in the response.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    /// The synchronous core of `narrate`.
    pub fn describe(&self, response: &AnalysisResponse) -> Result<Narrative, NarrativeError> {
        let indicator = &response.indicator;
        let mut sentences = Vec::new();

        if let Some(stats) = &response.statistics {
            sentences.push(format!(
                "{} stands at {:.2} {}, {:+.2} on the previous period.",
                indicator.name, stats.latest, indicator.unit, stats.change
            ));
        } else if let Some(latest) = response.historical_data.last() {
            sentences.push(format!(
                "{} stands at {:.2} {}.",
                indicator.name, latest.value, indicator.unit
            ));
        }

        if let Some(trend) = &response.trend {
            sentences.push(format!("Recent trend: {}.", trend.description));
        }

        if let (Some(first), Some(last)) = (response.forecasts.first(), response.forecasts.last()) {
            sentences.push(forecast_sentence(response.forecasts.len(), first, last, &indicator.unit));
        }

        if sentences.is_empty() {
            return Err(NarrativeError::NothingToDescribe(indicator.id.to_string()));
        }

        debug!(indicator = %indicator.id, sentences = sentences.len(), "Rendered template narrative");
        Ok(Narrative {
            content: sentences.join(" "),
            confidence: TEMPLATE_CONFIDENCE,
        })
    }
}

fn forecast_sentence(count: usize, first: &ForecastPoint, last: &ForecastPoint, unit: &str) -> String {
    let direction = if last.value > first.value {
        "rise"
    } else if last.value < first.value {
        "fall"
    } else {
        "hold steady"
    };
    format!(
        "The {} forecast expects it to {direction} over the next {count} periods, from {:.2} to {:.2} {unit}; \
         watch for policy changes and market conditions that could shift this path.",
        first.methodology, first.value, last.value
    )
}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(&self, response: &AnalysisResponse) -> Result<Narrative, NarrativeError> {
        self.describe(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{
        ConfidenceBand, Frequency, IndicatorId, IndicatorSummary, Methodology, Observation,
        TrendAnalysis,
    };

    fn response() -> AnalysisResponse {
        AnalysisResponse {
            indicator: IndicatorSummary {
                id: IndicatorId::Cpi,
                name: "Consumer Price Index".to_string(),
                unit: "YoY %".to_string(),
                frequency: Frequency::Monthly,
                source: "FRED".to_string(),
            },
            historical_data: vec![Observation::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                3.25,
                IndicatorId::Cpi,
            )],
            statistics: None,
            trend: None,
            forecasts: Vec::new(),
            accuracy: None,
        }
    }

    fn point(value: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            value,
            indicator: IndicatorId::Cpi,
            confidence: ConfidenceBand { lower: value - 0.1, upper: value + 0.1 },
            methodology: Methodology::Exponential,
            predicted: true,
        }
    }

    #[tokio::test]
    async fn test_describes_latest_value_and_trend() {
        let mut r = response();
        r.trend = Some(TrendAnalysis::insufficient());
        let narrative = TemplateNarrator::new().narrate(&r).await.unwrap();
        assert_eq!(
            narrative.content,
            "Consumer Price Index stands at 3.25 YoY %. Recent trend: insufficient data."
        );
        assert_eq!(narrative.confidence, 0.75);
    }

    #[tokio::test]
    async fn test_forecast_direction_is_reported() {
        let mut r = response();
        r.forecasts = vec![point(3.3), point(3.1)];
        let narrative = TemplateNarrator::new().narrate(&r).await.unwrap();
        assert!(narrative.content.contains("exponential forecast expects it to fall over the next 2 periods"));
        assert!(narrative.content.contains("from 3.30 to 3.10 YoY %"));
    }

    #[tokio::test]
    async fn test_empty_response_cannot_be_described() {
        let mut r = response();
        r.historical_data.clear();
        assert_eq!(
            TemplateNarrator::new().narrate(&r).await.unwrap_err(),
            NarrativeError::NothingToDescribe("cpi".to_string())
        );
    }
}
