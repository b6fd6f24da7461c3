use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Indicator '{0}' not found in catalog")]
    NotFound(String),

    #[error("Indicator '{0}' is registered more than once")]
    Duplicate(String),
}
