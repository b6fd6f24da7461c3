//! # EconoTrends Core Types
//!
//! Layer 0 of the workspace: the data model shared by every other crate
//! (indicators, observations, statistics, trend and forecast results) plus the
//! single two-decimal rounding rule applied wherever a number is published.

pub mod enums;
pub mod error;
pub mod rounding;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ChangeSeverity, Frequency, IndicatorId, Methodology, TrendDirection};
pub use error::CoreError;
pub use rounding::round2;
pub use structs::{
    values_of, Accuracy, ConfidenceBand, ForecastPoint, ForecastResult, Indicator,
    IndicatorSummary, Observation, Period, SignificantChange, Statistics, TrendAnalysis,
};
