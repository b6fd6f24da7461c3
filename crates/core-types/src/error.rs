use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),
}
