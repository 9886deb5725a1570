// Collaborative writing API - core
//
// Turns a user's request into finished text through three stages:
// Idea (draft) → FactCheck (extract references, ground with web search,
// rewrite) → Editor (polish). Every response carries all three steps.
//
// Domain logic lives in domains/pipeline; external services sit behind the
// traits in kernel/.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
