//! # EconoTrends Analytics Engine
//!
//! The deterministic numerical core: descriptive statistics, trend labelling,
//! methodology-dispatched forecasting and the confidence/accuracy estimates that
//! decorate a forecast.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of where the
//!   series came from. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every entry point is a free function of its inputs.
//!   Degenerate numerics (zero variance, zero denominators) are absorbed locally with
//!   neutral values instead of surfacing NaN or errors.
//! - **Rounding at the boundary:** Intermediate math is unrounded `f64`; published
//!   numbers are rounded once with `core_types::round2`.
//!
//! ## Public API
//!
//! - `statistics::compute`: Mean, median, dispersion and latest change.
//! - `trend::analyze`: Direction, strength and notable moves over the recent window.
//! - `forecast::forecast`: Point forecasts for the four methodologies.
//! - `confidence`: Bands, data quality and the accuracy proxy.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod confidence;
pub mod error;
pub mod forecast;
pub mod regression;
pub mod statistics;
pub mod trend;

pub use confidence::{accuracy, bound, build_forecast_points, margin};
pub use error::AnalyticsError;
pub use forecast::{decompose, forecast, Decomposition, ForecastModel, MAX_FORECAST_PERIODS};
pub use regression::LinearFit;
