//! Server dependencies for the pipeline (using traits for testability)
//!
//! This module provides the dependency container the pipeline stages are built
//! from. All external services use trait abstractions to enable testing.

use std::sync::Arc;

use crate::domains::pipeline::GroundingConfig;
use crate::kernel::{BaseAI, BaseSearchService};

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by every stage (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// LLM used for completions and structured reference extraction
    pub ai: Arc<dyn BaseAI>,
    /// Web search provider. `None` means search is not configured and
    /// grounding falls back to placeholder text.
    pub searcher: Option<Arc<dyn BaseSearchService>>,
    /// How the fact-check stage fans out its searches
    pub grounding: GroundingConfig,
}

impl ServerDeps {
    /// Create new ServerDeps with default grounding settings
    pub fn new(ai: Arc<dyn BaseAI>, searcher: Option<Arc<dyn BaseSearchService>>) -> Self {
        Self {
            ai,
            searcher,
            grounding: GroundingConfig::default(),
        }
    }

    pub fn with_grounding(mut self, grounding: GroundingConfig) -> Self {
        self.grounding = grounding;
        self
    }

    /// Whether web search grounding is live (vs placeholder mode)
    pub fn search_configured(&self) -> bool {
        self.searcher.is_some()
    }
}
