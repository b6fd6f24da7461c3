//! # EconoTrends Indicator Catalog
//!
//! The static registry of indicator metadata and the per-indicator series profiles
//! used by the synthetic data source. A pure lookup crate: no I/O, no mutation after
//! construction.

pub mod error;
pub mod registry;

pub use error::CatalogError;
pub use registry::{CatalogEntry, IndicatorCatalog, SeriesProfile};
