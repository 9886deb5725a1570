//! Structured reference extraction.

use tracing::debug;

use crate::domains::pipeline::errors::PipelineError;
use crate::domains::pipeline::models::ExtractedReferences;
use crate::domains::pipeline::prompts::{format_extraction_prompt, REFERENCE_EXTRACTION_SYSTEM_PROMPT};
use crate::kernel::{BaseAI, StructuredOutput};

/// Ask the model for the real-world references in `text`.
///
/// Transport failures and replies that don't match the schema both surface as
/// `ExtractionFailure`. Entries come back exactly as listed, in order.
pub async fn extract_references(ai: &dyn BaseAI, text: &str) -> Result<Vec<String>, PipelineError> {
    let raw = ai
        .generate_structured(
            REFERENCE_EXTRACTION_SYSTEM_PROMPT,
            &format_extraction_prompt(text),
            &ExtractedReferences::type_name(),
            ExtractedReferences::openai_schema(),
        )
        .await
        .map_err(|e| PipelineError::ExtractionFailure(format!("{:#}", e)))?;

    let references = parse_references(&raw)?;
    debug!(count = references.len(), "Extracted references");
    Ok(references)
}

/// Parse the structured reply into the reference list.
pub fn parse_references(raw: &str) -> Result<Vec<String>, PipelineError> {
    let parsed: ExtractedReferences = serde_json::from_str(raw).map_err(|e| {
        PipelineError::ExtractionFailure(format!("malformed structured reply: {}", e))
    })?;

    Ok(parsed.references)
}
