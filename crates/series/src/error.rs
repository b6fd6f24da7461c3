use catalog::CatalogError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Indicator '{0}' not found")]
    IndicatorNotFound(String),

    #[error("Observation date for '{indicator}' falls outside the supported calendar range ({steps} periods back)")]
    DateOutOfRange { indicator: String, steps: usize },
}

impl From<CatalogError> for SeriesError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) | CatalogError::Duplicate(id) => {
                SeriesError::IndicatorNotFound(id)
            }
        }
    }
}
