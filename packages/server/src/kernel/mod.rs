//! Kernel module - server infrastructure and dependencies.

pub mod bing_client;
pub mod deps;
pub mod llm_request;
pub mod test_dependencies;
pub mod traits;

// Re-export AI client types
pub use openai_client::{OpenAIClient, StructuredOutput};

/// Default chat model / Azure deployment name.
pub const GPT_4O: &str = "gpt-4o";

pub use bing_client::BingSearchClient;
pub use deps::ServerDeps;
pub use llm_request::LlmClient;
pub use test_dependencies::{MockAI, MockAICall, MockSearchService, TestDependencies};
pub use traits::*;
