//! # EconoTrends Analyzer
//!
//! The facade over the whole engine. It validates a request, pulls a series from the
//! injected provider, runs the requested analytics and assembles one response.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Orchestration:** Owns no math. Statistics, trend and forecasting live
//!   in `analytics`; data lives behind `series::SeriesProvider`.
//! - **Fail Fast:** Every parameter is checked before any series is generated, and a
//!   failure anywhere aborts the whole call. There are no partial responses.
//! - **Stateless:** The `Analyzer` holds only shared read-only collaborators and is
//!   safe to clone into every request handler.
//!
//! ## Public API
//!
//! - `Analyzer`: `analyze`, `forecast`, `forecast_batch` and `list_indicators`.
//! - `AnalysisRequest` / `AnalysisResponse` / `ForecastRequest`: The wire types.
//! - `AnalyzerError` / `ErrorBody`: Classified errors and their wire shape.

pub mod error;
pub mod facade;
pub mod request;

pub use error::{AnalyzerError, ErrorBody};
pub use facade::Analyzer;
pub use request::{AnalysisRequest, AnalysisResponse, ForecastRequest};
