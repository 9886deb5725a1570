// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (extract references, ground them, rewrite) lives in
// domains::pipeline and only talks to these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseSearchService)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// One exchange: a role instruction plus a single input message, raw text back.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Schema-constrained completion.
    ///
    /// Returns the JSON text the model produced for `schema`. Callers
    /// deserialize it into the type the schema was generated from.
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String>;
}

// =============================================================================
// Search Service Trait (Infrastructure)
// =============================================================================

/// A single web search hit, in provider rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: None,
        }
    }
}

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Search the web. An empty vector means the provider found nothing.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}
