use analytics::AnalyticsError;
use catalog::CatalogError;
use serde::{Deserialize, Serialize};
use series::SeriesError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Indicator '{0}' not found")]
    IndicatorNotFound(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Not enough data: {0}")]
    InsufficientData(String),

    #[error("An internal error occurred: {0}")]
    Internal(String),
}

/// The wire shape of an error: `{ code, message, details? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AnalyzerError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        AnalyzerError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// The stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AnalyzerError::IndicatorNotFound(_) => "INDICATOR_NOT_FOUND",
            AnalyzerError::InvalidParameter { .. } => "INVALID_PARAMETER",
            AnalyzerError::InsufficientData(_) => "INSUFFICIENT_DATA",
            AnalyzerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            AnalyzerError::IndicatorNotFound(id) => Some(serde_json::json!({ "indicator": id })),
            AnalyzerError::InvalidParameter { name, reason } => {
                Some(serde_json::json!({ "parameter": name, "constraint": reason }))
            }
            _ => None,
        };
        ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<CatalogError> for AnalyzerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AnalyzerError::IndicatorNotFound(id),
            CatalogError::Duplicate(_) => AnalyzerError::Internal(err.to_string()),
        }
    }
}

impl From<SeriesError> for AnalyzerError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::IndicatorNotFound(id) => AnalyzerError::IndicatorNotFound(id),
            SeriesError::DateOutOfRange { .. } => AnalyzerError::invalid("endDate", err.to_string()),
        }
    }
}

impl From<AnalyticsError> for AnalyzerError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::InsufficientData(msg) => AnalyzerError::InsufficientData(msg),
            AnalyticsError::InvalidParameter { name, reason } => {
                AnalyzerError::InvalidParameter { name, reason }
            }
        }
    }
}
