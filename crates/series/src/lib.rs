//! # EconoTrends Series Provider
//!
//! Produces the ordered observation series the analytics run on.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Depends only on `core-types` and `catalog`. The provider is
//!   injected into the facade, so the engine never knows where numbers come from.
//! - **Deterministic by default:** `SyntheticSeriesProvider` seeds its noise from the
//!   request, so repeated calls agree. OS entropy is available as an explicit opt-in.
//!
//! ## Public API
//!
//! - `SeriesProvider`: The trait every data source implements.
//! - `SyntheticSeriesProvider` / `NoisePolicy`: Profile-driven synthetic history.
//! - `StaticSeriesProvider`: Serves caller-supplied observations.

pub mod error;
pub mod fixed;
pub mod synthetic;

pub use error::SeriesError;
pub use fixed::StaticSeriesProvider;
pub use synthetic::{NoisePolicy, SyntheticSeriesProvider};

use chrono::NaiveDate;
use core_types::{IndicatorId, Observation};

/// A source of historical observations for one indicator.
///
/// Implementations return at most `periods` observations, oldest first, with strictly
/// increasing dates and the last one no later than `end_date`. The `Send + Sync`
/// bounds let one provider be shared by every request handler.
pub trait SeriesProvider: Send + Sync {
    fn generate(
        &self,
        indicator: IndicatorId,
        periods: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<Observation>, SeriesError>;
}
