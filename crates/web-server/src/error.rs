use analyzer::{AnalyzerError, ErrorBody};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use narrative::NarrativeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
    #[error("Narrative error: {0}")]
    Narrative(#[from] NarrativeError),
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Background task failed: {0}")]
    Task(String),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Analyzer(err) => {
                let status = match err {
                    AnalyzerError::IndicatorNotFound(_) => StatusCode::NOT_FOUND,
                    AnalyzerError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
                    AnalyzerError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    AnalyzerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_body())
            }
            AppError::Query(rejection) => (
                rejection.status(),
                ErrorBody {
                    code: "INVALID_PARAMETER".to_string(),
                    message: rejection.body_text(),
                    details: None,
                },
            ),
            AppError::Body(rejection) => (
                rejection.status(),
                ErrorBody {
                    code: "INVALID_PARAMETER".to_string(),
                    message: rejection.body_text(),
                    details: None,
                },
            ),
            AppError::Narrative(NarrativeError::NothingToDescribe(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    code: "INSUFFICIENT_DATA".to_string(),
                    message: self.to_string(),
                    details: None,
                },
            ),
            AppError::Narrative(_) | AppError::Task(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal error occurred".to_string(),
                    details: None,
                },
            ),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed.");
        } else {
            tracing::debug!(error = %self, "Request rejected.");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(AnalyzerError::IndicatorNotFound("x".into())), StatusCode::NOT_FOUND),
            (AppError::from(AnalyzerError::invalid("periods", "too big")), StatusCode::BAD_REQUEST),
            (AppError::from(AnalyzerError::InsufficientData("empty".into())), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::from(AnalyzerError::Internal("boom".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::from(NarrativeError::NothingToDescribe("cpi".into())), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::Task("join".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_bad_query_string_gets_the_json_error_body() {
        use crate::handlers::AnalysisQuery;
        use axum::extract::Query;
        use axum::http::Uri;

        let uri: Uri = "/api/indicators/cpi?periods=abc".parse().unwrap();
        let rejection = Query::<AnalysisQuery>::try_from_uri(&uri).unwrap_err();
        let response = AppError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "INVALID_PARAMETER");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let (_, body) = AppError::Task("secret panic message".into()).status_and_body();
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("secret"));
    }
}
