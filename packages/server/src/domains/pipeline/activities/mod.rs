//! Pipeline activities
//!
//! The three steps of the fact-check stage:
//! - `extract_references`: structured call listing real-world references
//! - `ground_references`: one web search per distinct reference
//! - `rewrite_text`: completion that corrects the draft against the evidence

pub mod extract_references;
pub mod ground_references;
pub mod rewrite_text;

pub use extract_references::extract_references;
pub use ground_references::{ground_references, GroundingClient, GroundingConfig};
pub use rewrite_text::{ensure_change_note, has_change_note, rewrite_text};
