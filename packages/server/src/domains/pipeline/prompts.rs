//! Prompts for the writing pipeline.

/// Line prefix the fact-check stage uses for its change summary.
pub const NOTE_MARKER: &str = "Note:";

/// System prompt for the Idea stage.
pub const IDEA_SYSTEM_PROMPT: &str = r#"You are the Idea Agent, the first writer in a three-step writing team.

Your job:
- Turn the user's request into a fresh, imaginative draft
- Favor creativity over factual accuracy; a later step checks facts
- Match the requested tone. If the user asks for comedy, be playful
- Outlines and summaries may be short or long, whatever the request needs

Return only the draft."#;

/// System prompt for the Editor stage.
pub const EDITOR_SYSTEM_PROMPT: &str = r#"You are the Editor Agent, the last writer in a three-step writing team.

Your job:
- Polish style, grammar, clarity and flow
- Keep the creative or comedic tone the user asked for
- Keep every correction and disclaimer the fact checker added
- Light, playful wording is welcome when it suits the request

Return the finished text, cohesive and reader-friendly."#;

/// System prompt for structured reference extraction.
pub const REFERENCE_EXTRACTION_SYSTEM_PROMPT: &str = r#"You extract checkable references for a fact-checking step.

Return JSON with a "references" array containing one string for each real-world
person, place, date or historical fact mentioned in the text.

Rules:
- Copy each reference the way it appears in the text
- List each reference once
- If there are none, return an empty array"#;

/// System prompt for the grounded rewrite.
pub const REWRITE_SYSTEM_PROMPT: &str = r#"You rewrite drafts so they agree with web search evidence.

You receive:
- The original text
- The references found in it
- One web search result per reference

Correct the text where the evidence contradicts it, or add a short disclaimer
where the evidence is missing or unclear. Keep everything else, including tone.

Finish with a single line starting with "Note:" that briefly says what changed."#;

/// User prompt for reference extraction.
pub fn format_extraction_prompt(text: &str) -> String {
    format!(
        "Text to parse:\n\n{}\n\nExtract the references into the \"references\" array.",
        text
    )
}

/// User prompt for the grounded rewrite.
pub fn format_rewrite_prompt(original: &str, references: &[String], grounding_json: &str) -> String {
    format!(
        r#"Original text:
{original}

References found: {references:?}

Web search results:
{grounding_json}

Rewrite the text with corrections or disclaimers.
End with a short "{NOTE_MARKER}" line describing what changed."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_prompt_carries_all_inputs() {
        let prompt = format_rewrite_prompt(
            "Napoleon won at Waterloo.",
            &["Napoleon".to_string(), "Waterloo".to_string()],
            "{\n  \"Napoleon\": \"snippet\"\n}",
        );

        assert!(prompt.contains("Napoleon won at Waterloo."));
        assert!(prompt.contains(r#"["Napoleon", "Waterloo"]"#));
        assert!(prompt.contains("\"Napoleon\": \"snippet\""));
        assert!(prompt.contains("\"Note:\""));
    }

    #[test]
    fn test_extraction_prompt_embeds_text() {
        let prompt = format_extraction_prompt("Marie Curie lived in Paris.");
        assert!(prompt.contains("Marie Curie lived in Paris."));
    }
}
