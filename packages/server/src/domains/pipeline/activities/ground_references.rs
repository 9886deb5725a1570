//! Web search grounding for extracted references.
//!
//! Grounding never fails: an unconfigured provider, an empty result set and a
//! provider error all become descriptive text that the rewrite step reads.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::domains::pipeline::models::GroundingResult;
use crate::kernel::BaseSearchService;

/// Fan-out settings for grounding searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingConfig {
    /// Upper bound on searches in flight. 1 means strictly sequential.
    pub max_concurrent_searches: usize,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            max_concurrent_searches: 1,
        }
    }
}

impl GroundingConfig {
    pub fn with_max_concurrent_searches(max_concurrent_searches: usize) -> Self {
        Self {
            max_concurrent_searches,
        }
    }

    fn concurrency(&self) -> usize {
        self.max_concurrent_searches.max(1)
    }
}

/// Turns one query into one grounding snippet.
#[derive(Clone, Default)]
pub struct GroundingClient {
    searcher: Option<Arc<dyn BaseSearchService>>,
}

impl GroundingClient {
    pub fn new(searcher: Option<Arc<dyn BaseSearchService>>) -> Self {
        Self { searcher }
    }

    pub fn is_configured(&self) -> bool {
        self.searcher.is_some()
    }

    /// Snippet for the top hit, or a message saying why there is none.
    pub async fn search(&self, query: &str) -> String {
        let Some(searcher) = &self.searcher else {
            debug!(query, "Web search not configured, using placeholder");
            return not_configured_message(query);
        };

        match searcher.search(query).await {
            Ok(results) => match results.first() {
                Some(top) => format!("First webpage result: {}\nURL: {}", top.title, top.url),
                None => no_results_message(query),
            },
            Err(e) => {
                warn!(query, error = %e, "Web search failed");
                format!("Web search error: {:#}", e)
            }
        }
    }
}

pub fn not_configured_message(query: &str) -> String {
    format!("No web search configured. (Would have searched '{}')", query)
}

pub fn no_results_message(query: &str) -> String {
    format!("No search results found for '{}'.", query)
}

/// Ground every extracted reference, one search each, in extraction order.
///
/// At most `config.max_concurrent_searches` searches run at once; results are
/// collected in reference order regardless of completion order. A repeated
/// reference is searched again and keeps its first position in the map.
pub async fn ground_references(
    client: &GroundingClient,
    references: &[String],
    config: &GroundingConfig,
) -> GroundingResult {
    debug!(
        references = references.len(),
        concurrency = config.concurrency(),
        "Grounding references"
    );

    let searches: Vec<_> = references
        .iter()
        .map(|reference| {
            let client = client.clone();
            let reference = reference.clone();
            async move {
                let snippet = client.search(&reference).await;
                (reference, snippet)
            }
        })
        .collect();

    stream::iter(searches)
        .buffered(config.concurrency())
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect()
}
