use thiserror::Error;

use super::models::StageRole;

/// Failures that abort a pipeline run. No partial trace survives any of them.
///
/// Grounding problems are deliberately absent: a failed or unconfigured search
/// becomes placeholder text inside the fact-check stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Empty or whitespace-only user text; no stage ran
    #[error("message cannot be empty")]
    InvalidInput,

    /// Structured reference extraction failed or returned the wrong shape
    #[error("reference extraction failed: {0}")]
    ExtractionFailure(String),

    /// A completion call (idea, rewrite, editor) failed
    #[error("{role} generation failed: {message}")]
    GenerationFailure { role: StageRole, message: String },
}

impl PipelineError {
    pub(crate) fn generation(role: StageRole, error: anyhow::Error) -> Self {
        Self::GenerationFailure {
            role,
            message: format!("{:#}", error),
        }
    }

    /// Caused by the request rather than by a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}
