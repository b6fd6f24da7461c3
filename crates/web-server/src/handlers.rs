use crate::{error::AppError, AppState};
use analyzer::{AnalysisRequest, AnalysisResponse, ForecastRequest};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use core_types::{ForecastResult, Indicator, IndicatorId, Methodology};
use narrative::Narrative;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Query parameters accepted by the per-indicator routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQuery {
    pub periods: Option<usize>,
    pub include_statistics: Option<bool>,
    pub include_trend: Option<bool>,
    pub include_forecast: Option<bool>,
    pub forecast_periods: Option<usize>,
    pub methodology: Option<Methodology>,
    pub confidence: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AnalysisQuery {
    fn into_request(self, indicator: String) -> AnalysisRequest {
        AnalysisRequest {
            indicator,
            periods: self.periods,
            include_statistics: self.include_statistics,
            include_trend: self.include_trend,
            include_forecast: self.include_forecast,
            forecast_periods: self.forecast_periods,
            methodology: self.methodology,
            confidence: self.confidence,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchForecastRequest {
    pub indicators: Vec<String>,
    pub periods: Option<usize>,
    pub methodology: Option<Methodology>,
    pub confidence: Option<f64>,
    pub end_date: Option<NaiveDate>,
}

/// # GET /api/indicators
pub async fn list_indicators(State(state): State<Arc<AppState>>) -> Json<Vec<Indicator>> {
    Json(state.analyzer.list_indicators())
}

/// # GET /api/indicators/:id
pub async fn get_indicator_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<AnalysisQuery>, AppError>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = state.analyzer.analyze(&query.into_request(id))?;
    Ok(Json(response))
}

/// # POST /api/forecast
pub async fn post_forecast(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(request), _): WithRejection<Json<ForecastRequest>, AppError>,
) -> Result<Json<ForecastResult>, AppError> {
    let result = state.analyzer.forecast(&request)?;
    Ok(Json(result))
}

/// # POST /api/forecast/batch
/// The per-indicator pipelines run on the rayon pool, off the async workers.
pub async fn post_forecast_batch(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(request), _): WithRejection<Json<BatchForecastRequest>, AppError>,
) -> Result<Json<BTreeMap<IndicatorId, ForecastResult>>, AppError> {
    let analyzer = state.analyzer.clone();
    let results = tokio::task::spawn_blocking(move || {
        analyzer.forecast_batch(
            &request.indicators,
            request.periods,
            request.methodology,
            request.confidence,
            request.end_date,
        )
    })
    .await
    .map_err(|e| AppError::Task(e.to_string()))??;
    Ok(Json(results))
}

/// # GET /api/indicators/:id/insight
/// Same parameters as the analysis route, but the forecast is included unless the
/// caller turns it off.
pub async fn get_indicator_insight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<AnalysisQuery>, AppError>,
) -> Result<Json<Narrative>, AppError> {
    let mut request = query.into_request(id);
    request.include_forecast.get_or_insert(true);
    let response = state.analyzer.analyze(&request)?;
    let narrative = state.narrator.narrate(&response).await?;
    Ok(Json(narrative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::Analyzer;
    use configuration::Settings;
    use narrative::TemplateNarrator;
    use std::marker::PhantomData;

    fn with_query(query: AnalysisQuery) -> WithRejection<Query<AnalysisQuery>, AppError> {
        WithRejection(Query(query), PhantomData)
    }

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            analyzer: Analyzer::from_settings(&Settings::default()),
            narrator: Arc::new(TemplateNarrator::new()),
        })
    }

    fn end_date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 6, 30)
    }

    #[tokio::test]
    async fn test_list_indicators() {
        let Json(indicators) = list_indicators(State(state())).await;
        assert_eq!(indicators.len(), 4);
    }

    #[tokio::test]
    async fn test_analysis_route_applies_query() {
        let query = AnalysisQuery {
            periods: Some(6),
            include_forecast: Some(true),
            forecast_periods: Some(2),
            end_date: end_date(),
            ..AnalysisQuery::default()
        };
        let Json(response) = get_indicator_analysis(State(state()), Path("cpi".to_string()), with_query(query))
            .await
            .unwrap();
        assert_eq!(response.historical_data.len(), 6);
        assert_eq!(response.forecasts.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_indicator_is_an_app_error() {
        let result = get_indicator_analysis(
            State(state()),
            Path("exchange_rate".to_string()),
            with_query(AnalysisQuery::default()),
        )
        .await;
        assert!(matches!(
            result,
            Err(AppError::Analyzer(analyzer::AnalyzerError::IndicatorNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_batch_route_keys_results_by_indicator() {
        let request = BatchForecastRequest {
            indicators: vec!["cpi".to_string(), "unemployment".to_string()],
            periods: Some(3),
            methodology: None,
            confidence: None,
            end_date: end_date(),
        };
        let Json(results) = post_forecast_batch(State(state()), WithRejection(Json(request), PhantomData)).await.unwrap();
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["cpi"]["forecasts"].as_array().unwrap().len(), 3);
        assert!(json.get("unemployment").is_some());
    }

    #[tokio::test]
    async fn test_insight_includes_forecast_by_default() {
        let query = AnalysisQuery { end_date: end_date(), ..AnalysisQuery::default() };
        let Json(narrative) = get_indicator_insight(State(state()), Path("gdp".to_string()), with_query(query))
            .await
            .unwrap();
        assert!(narrative.content.contains("forecast expects it to"));
        assert_eq!(narrative.confidence, 0.75);
    }
}
