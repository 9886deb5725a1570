use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Stage;
use crate::domains::pipeline::errors::PipelineError;
use crate::domains::pipeline::models::StageRole;
use crate::domains::pipeline::prompts::{EDITOR_SYSTEM_PROMPT, IDEA_SYSTEM_PROMPT};
use crate::kernel::BaseAI;

/// A stage that is one completion under a fixed role instruction.
pub struct InstructedStage {
    role: StageRole,
    system_prompt: &'static str,
    ai: Arc<dyn BaseAI>,
}

impl InstructedStage {
    pub fn new(role: StageRole, system_prompt: &'static str, ai: Arc<dyn BaseAI>) -> Self {
        Self {
            role,
            system_prompt,
            ai,
        }
    }

    pub fn idea(ai: Arc<dyn BaseAI>) -> Self {
        Self::new(StageRole::Idea, IDEA_SYSTEM_PROMPT, ai)
    }

    pub fn editor(ai: Arc<dyn BaseAI>) -> Self {
        Self::new(StageRole::Editor, EDITOR_SYSTEM_PROMPT, ai)
    }
}

#[async_trait]
impl Stage for InstructedStage {
    fn role(&self) -> StageRole {
        self.role
    }

    async fn run(&self, input: &str) -> Result<String, PipelineError> {
        debug!(role = %self.role, input_chars = input.len(), "Running stage");

        self.ai
            .complete(self.system_prompt, input)
            .await
            .map_err(|e| PipelineError::generation(self.role, e))
    }
}
