use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::Stage;
use crate::domains::pipeline::activities::{
    extract_references, ground_references, rewrite_text, GroundingClient, GroundingConfig,
};
use crate::domains::pipeline::errors::PipelineError;
use crate::domains::pipeline::models::{GroundingResult, StageRole};
use crate::kernel::{BaseAI, ServerDeps};

/// Everything the fact-check stage produced, not just the rewritten text.
#[derive(Debug, Clone)]
pub struct FactCheckOutcome {
    pub references: Vec<String>,
    pub grounding: GroundingResult,
    pub text: String,
}

/// Extract references, ground each with a web search, rewrite the draft.
pub struct FactCheckStage {
    ai: Arc<dyn BaseAI>,
    grounding: GroundingClient,
    config: GroundingConfig,
}

impl FactCheckStage {
    pub fn new(deps: &ServerDeps) -> Self {
        Self {
            ai: deps.ai.clone(),
            grounding: GroundingClient::new(deps.searcher.clone()),
            config: deps.grounding.clone(),
        }
    }

    pub async fn check(&self, draft: &str) -> Result<FactCheckOutcome, PipelineError> {
        let references = extract_references(self.ai.as_ref(), draft).await?;

        let grounding = ground_references(&self.grounding, &references, &self.config).await;
        info!(
            references = references.len(),
            grounded = grounding.len(),
            search_configured = self.grounding.is_configured(),
            "Grounded references"
        );

        let text = rewrite_text(self.ai.as_ref(), draft, &references, &grounding).await?;

        Ok(FactCheckOutcome {
            references,
            grounding,
            text,
        })
    }
}

#[async_trait]
impl Stage for FactCheckStage {
    fn role(&self) -> StageRole {
        StageRole::FactCheck
    }

    async fn run(&self, input: &str) -> Result<String, PipelineError> {
        Ok(self.check(input).await?.text)
    }
}
