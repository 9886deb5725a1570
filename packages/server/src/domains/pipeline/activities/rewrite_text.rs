//! Grounded rewrite of the draft.

use crate::domains::pipeline::errors::PipelineError;
use crate::domains::pipeline::models::{GroundingResult, StageRole};
use crate::domains::pipeline::prompts::{format_rewrite_prompt, NOTE_MARKER, REWRITE_SYSTEM_PROMPT};
use crate::kernel::BaseAI;

/// Rewrite `original` against the grounding evidence.
///
/// The returned text always ends with a change note; one is appended if the
/// model left it out.
pub async fn rewrite_text(
    ai: &dyn BaseAI,
    original: &str,
    references: &[String],
    grounding: &GroundingResult,
) -> Result<String, PipelineError> {
    let prompt = format_rewrite_prompt(original, references, &grounding.to_pretty_json());

    let reply = ai
        .complete(REWRITE_SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| PipelineError::generation(StageRole::FactCheck, e))?;

    Ok(ensure_change_note(reply, grounding))
}

/// Whether the last non-empty line opens with the note marker, ignoring
/// markdown emphasis.
pub fn has_change_note(text: &str) -> bool {
    text.lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '#' | '>'))
                .starts_with(NOTE_MARKER)
        })
        .unwrap_or(false)
}

/// Append a fallback note when the model didn't write one.
pub fn ensure_change_note(text: String, grounding: &GroundingResult) -> String {
    if has_change_note(&text) {
        return text;
    }

    let note = if grounding.is_empty() {
        "no corrections needed.".to_string()
    } else {
        format!(
            "{} reference(s) checked; no change summary was provided.",
            grounding.len()
        )
    };

    let body = text.trim_end();
    if body.is_empty() {
        format!("{} {}", NOTE_MARKER, note)
    } else {
        format!("{}\n\n{} {}", body, NOTE_MARKER, note)
    }
}
