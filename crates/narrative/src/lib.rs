//! # EconoTrends Narrative
//!
//! Prose summaries of an analysis result. Real deployments may plug a language-model
//! provider in behind `Narrator`; this crate ships the deterministic
//! `TemplateNarrator`, which is also the fallback when no provider is configured.

pub mod error;
pub mod template;

pub use error::NarrativeError;
pub use template::TemplateNarrator;

use analyzer::AnalysisResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A short prose description of an analysis, with the narrator's own confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub content: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

/// Something that can describe an `AnalysisResponse` in words.
///
/// Implementations read the response only; they must not alter the numbers.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, response: &AnalysisResponse) -> Result<Narrative, NarrativeError>;
}
