// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Nothing here touches the network.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{BaseAI, BaseSearchService, SearchResult, ServerDeps};
use crate::domains::pipeline::GroundingConfig;

// =============================================================================
// Mock AI
// =============================================================================

/// Record of a call made to the mock AI.
#[derive(Debug, Clone, PartialEq)]
pub enum MockAICall {
    Complete {
        system: String,
        user: String,
    },
    Structured {
        system: String,
        user: String,
        schema_name: String,
    },
}

impl MockAICall {
    pub fn system(&self) -> &str {
        match self {
            Self::Complete { system, .. } | Self::Structured { system, .. } => system,
        }
    }

    pub fn user(&self) -> &str {
        match self {
            Self::Complete { user, .. } | Self::Structured { user, .. } => user,
        }
    }
}

/// Scriptable BaseAI.
///
/// Completions are keyed by system prompt; an unscripted prompt echoes the
/// user message back. Structured calls return `{"references": []}` unless told
/// otherwise.
pub struct MockAI {
    replies: Mutex<HashMap<String, String>>,
    failures: Mutex<HashSet<String>>,
    structured_reply: Mutex<String>,
    structured_failure: Mutex<Option<String>>,
    calls: Mutex<Vec<MockAICall>>,
}

impl Default for MockAI {
    fn default() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashSet::new()),
            structured_reply: Mutex::new(r#"{"references":[]}"#.to_string()),
            structured_failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` whenever the system prompt is `system_prompt`.
    pub fn with_reply(self, system_prompt: &str, reply: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(system_prompt.to_string(), reply.to_string());
        self
    }

    /// Fail every completion issued with `system_prompt`.
    pub fn failing_on(self, system_prompt: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(system_prompt.to_string());
        self
    }

    /// Structured calls return these references.
    pub fn with_references(self, references: &[&str]) -> Self {
        let body = serde_json::json!({ "references": references }).to_string();
        self.with_structured_reply(&body)
    }

    /// Structured calls return this raw text, valid JSON or not.
    pub fn with_structured_reply(self, raw: &str) -> Self {
        *self.structured_reply.lock().unwrap() = raw.to_string();
        self
    }

    /// Structured calls fail at the transport level.
    pub fn failing_structured(self, message: &str) -> Self {
        *self.structured_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Get all calls made to this mock, in order.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.lock().unwrap().clone()
    }

    /// User prompts sent with a given system prompt.
    pub fn prompts_for(&self, system_prompt: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.system() == system_prompt)
            .map(|c| c.user().to_string())
            .collect()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(MockAICall::Complete {
            system: system_prompt.to_string(),
            user: user_prompt.to_string(),
        });

        if self.failures.lock().unwrap().contains(system_prompt) {
            anyhow::bail!("mock completion failure");
        }

        Ok(self
            .replies
            .lock()
            .unwrap()
            .get(system_prompt)
            .cloned()
            .unwrap_or_else(|| user_prompt.to_string()))
    }

    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        _schema: serde_json::Value,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(MockAICall::Structured {
            system: system_prompt.to_string(),
            user: user_prompt.to_string(),
            schema_name: schema_name.to_string(),
        });

        if let Some(message) = self.structured_failure.lock().unwrap().clone() {
            anyhow::bail!(message);
        }

        Ok(self.structured_reply.lock().unwrap().clone())
    }
}

// =============================================================================
// Mock Search Service
// =============================================================================

/// Scriptable BaseSearchService. Unscripted queries return no results.
#[derive(Default)]
pub struct MockSearchService {
    results: Mutex<HashMap<String, Vec<SearchResult>>>,
    errors: Mutex<HashMap<String, String>>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Single top result for `query`.
    pub fn with_result(self, query: &str, title: &str, url: &str) -> Self {
        self.with_results(query, vec![SearchResult::new(title, url)])
    }

    /// Searching `query` fails with `message`.
    pub fn failing_for(self, query: &str, message: &str) -> Self {
        self.errors
            .lock()
            .unwrap()
            .insert(query.to_string(), message.to_string());
        self
    }

    /// Queries received, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());

        if let Some(message) = self.errors.lock().unwrap().get(query) {
            anyhow::bail!("{}", message);
        }

        Ok(self
            .results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock-backed dependency set. Keeps handles on the mocks so tests can
/// inspect calls after running the pipeline.
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub search: Option<Arc<MockSearchService>>,
    pub grounding: GroundingConfig,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            search: Some(Arc::new(MockSearchService::new())),
            grounding: GroundingConfig::default(),
        }
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn with_search(mut self, search: MockSearchService) -> Self {
        self.search = Some(Arc::new(search));
        self
    }

    /// Simulate a deployment without search credentials.
    pub fn without_search(mut self) -> Self {
        self.search = None;
        self
    }

    pub fn with_grounding(mut self, grounding: GroundingConfig) -> Self {
        self.grounding = grounding;
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        let searcher = self
            .search
            .clone()
            .map(|s| s as Arc<dyn BaseSearchService>);

        ServerDeps::new(self.ai.clone(), searcher).with_grounding(self.grounding.clone())
    }
}
