//! Scripted model replies and search results for a known draft.

use writer_core::domains::pipeline::prompts::{
    EDITOR_SYSTEM_PROMPT, IDEA_SYSTEM_PROMPT, REWRITE_SYSTEM_PROMPT,
};
use writer_core::kernel::{MockAI, MockSearchService};

pub const USER_REQUEST: &str = "Write a short funny story about Napoleon.";

pub const DRAFT: &str = "Napoleon won the Battle of Waterloo, then opened a bakery in Paris.";

pub const CHECKED: &str = "Napoleon lost the Battle of Waterloo, then (in this story) opened a bakery in Paris.\n\nNote: corrected the outcome of Waterloo and flagged the bakery as fiction.";

pub const FINAL: &str = "Napoleon lost at Waterloo and, in our telling, consoled himself by opening a bakery in Paris.\n\nNote: corrected the outcome of Waterloo and flagged the bakery as fiction.";

pub const REFERENCES: [&str; 3] = ["Napoleon", "Battle of Waterloo", "Paris"];

/// Model that plays every stage of the Napoleon story.
pub fn napoleon_ai() -> MockAI {
    MockAI::new()
        .with_reply(IDEA_SYSTEM_PROMPT, DRAFT)
        .with_references(&REFERENCES)
        .with_reply(REWRITE_SYSTEM_PROMPT, CHECKED)
        .with_reply(EDITOR_SYSTEM_PROMPT, FINAL)
}

/// Search results for two of the three references; "Paris" finds nothing.
pub fn napoleon_search() -> MockSearchService {
    MockSearchService::new()
        .with_result(
            "Napoleon",
            "Napoleon - Wikipedia",
            "https://en.wikipedia.org/wiki/Napoleon",
        )
        .with_result(
            "Battle of Waterloo",
            "Battle of Waterloo - Wikipedia",
            "https://en.wikipedia.org/wiki/Battle_of_Waterloo",
        )
}
