use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NarrativeError {
    #[error("Nothing to describe for indicator '{0}': the response has no data")]
    NothingToDescribe(String),

    #[error("Narrative provider failed: {0}")]
    Provider(String),
}
