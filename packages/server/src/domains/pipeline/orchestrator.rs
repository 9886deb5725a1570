//! Sequential Idea → FactCheck → Editor run.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::errors::PipelineError;
use super::models::{PipelineResult, PipelineStep};
use super::stages::{FactCheckStage, InstructedStage, Stage};
use crate::kernel::ServerDeps;

/// Replies that end an agent's exchange in a group chat.
const TERMINATION_TOKENS: [&str; 2] = ["exit", "quit"];

/// True if the whole reply is a termination token.
pub fn is_termination_token(reply: &str) -> bool {
    let reply = reply.trim();
    TERMINATION_TOKENS
        .iter()
        .any(|token| reply.eq_ignore_ascii_case(token))
}

/// The three-stage writing pipeline. Cheap to share; runs don't share state.
pub struct Pipeline {
    stages: [Arc<dyn Stage>; 3],
}

impl Pipeline {
    pub fn new(deps: &ServerDeps) -> Self {
        Self::from_stages(
            Arc::new(InstructedStage::idea(deps.ai.clone())),
            Arc::new(FactCheckStage::new(deps)),
            Arc::new(InstructedStage::editor(deps.ai.clone())),
        )
    }

    /// Build from explicit stages, in execution order.
    pub fn from_stages(
        idea: Arc<dyn Stage>,
        fact_check: Arc<dyn Stage>,
        editor: Arc<dyn Stage>,
    ) -> Self {
        Self {
            stages: [idea, fact_check, editor],
        }
    }

    /// Run every stage on `user_text`, each one on its predecessor's output.
    ///
    /// The first failing stage aborts the run; no partial trace is returned.
    #[instrument(skip_all, fields(run_id = %uuid::Uuid::new_v4()))]
    pub async fn run(&self, user_text: &str) -> Result<PipelineResult, PipelineError> {
        let input = user_text.trim();
        if input.is_empty() {
            return Err(PipelineError::InvalidInput);
        }

        info!(input_chars = input.len(), "Pipeline run started");

        let mut steps: Vec<PipelineStep> = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let role = stage.role();
            let stage_input = steps.last().map(PipelineStep::content).unwrap_or(input);

            let reply = stage.run(stage_input).await.map_err(|e| {
                error!(stage = %role, error = %e, "Stage failed");
                e
            })?;

            if is_termination_token(&reply) {
                debug!(stage = %role, "Stage ended its exchange with a termination token");
            }
            debug!(stage = %role, output_chars = reply.len(), "Stage finished");

            steps.push(PipelineStep::new(role, reply));
        }

        info!("Pipeline run finished");
        Ok(PipelineResult::new(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pipeline::models::StageRole;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stage that records its input and replies with a fixed string.
    struct FixedStage {
        role: StageRole,
        reply: Result<String, ()>,
        inputs: Mutex<Vec<String>>,
    }

    impl FixedStage {
        fn ok(role: StageRole, reply: &str) -> Arc<Self> {
            Arc::new(Self {
                role,
                reply: Ok(reply.to_string()),
                inputs: Mutex::new(Vec::new()),
            })
        }

        fn failing(role: StageRole) -> Arc<Self> {
            Arc::new(Self {
                role,
                reply: Err(()),
                inputs: Mutex::new(Vec::new()),
            })
        }

        fn inputs(&self) -> Vec<String> {
            self.inputs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Stage for FixedStage {
        fn role(&self) -> StageRole {
            self.role
        }

        async fn run(&self, input: &str) -> Result<String, PipelineError> {
            self.inputs.lock().unwrap().push(input.to_string());
            self.reply.clone().map_err(|_| PipelineError::GenerationFailure {
                role: self.role,
                message: "stage down".to_string(),
            })
        }
    }

    #[test]
    fn test_termination_tokens() {
        assert!(is_termination_token("exit"));
        assert!(is_termination_token(" QUIT\n"));
        assert!(!is_termination_token("exit the building"));
    }

    #[tokio::test]
    async fn test_each_stage_gets_previous_output() {
        let idea = FixedStage::ok(StageRole::Idea, "draft");
        let fact = FixedStage::ok(StageRole::FactCheck, "checked");
        let editor = FixedStage::ok(StageRole::Editor, "final");
        let pipeline = Pipeline::from_stages(idea.clone(), fact.clone(), editor.clone());

        let result = pipeline.run("  write a poem  ").await.unwrap();

        assert_eq!(idea.inputs(), vec!["write a poem"]);
        assert_eq!(fact.inputs(), vec!["draft"]);
        assert_eq!(editor.inputs(), vec!["checked"]);
        let contents: Vec<&str> = result.steps().iter().map(PipelineStep::content).collect();
        assert_eq!(contents, vec!["draft", "checked", "final"]);
        assert_eq!(result.final_text(), "final");
    }

    #[tokio::test]
    async fn test_blank_input_rejected_before_any_stage() {
        let idea = FixedStage::ok(StageRole::Idea, "draft");
        let pipeline = Pipeline::from_stages(
            idea.clone(),
            FixedStage::ok(StageRole::FactCheck, "checked"),
            FixedStage::ok(StageRole::Editor, "final"),
        );

        for blank in ["", "   ", "\n\t"] {
            assert!(matches!(
                pipeline.run(blank).await,
                Err(PipelineError::InvalidInput)
            ));
        }
        assert!(idea.inputs().is_empty());
    }

    #[tokio::test]
    async fn test_failure_stops_later_stages() {
        let editor = FixedStage::ok(StageRole::Editor, "final");
        let pipeline = Pipeline::from_stages(
            FixedStage::ok(StageRole::Idea, "draft"),
            FixedStage::failing(StageRole::FactCheck),
            editor.clone(),
        );

        let err = pipeline.run("topic").await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::GenerationFailure {
                role: StageRole::FactCheck,
                ..
            }
        ));
        assert!(editor.inputs().is_empty());
    }

    #[tokio::test]
    async fn test_termination_token_reply_is_passed_on() {
        let editor = FixedStage::ok(StageRole::Editor, "final");
        let pipeline = Pipeline::from_stages(
            FixedStage::ok(StageRole::Idea, "exit"),
            FixedStage::ok(StageRole::FactCheck, "checked"),
            editor.clone(),
        );

        let result = pipeline.run("topic").await.unwrap();

        assert_eq!(result.steps()[0].content(), "exit");
        assert_eq!(result.steps().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_reply_becomes_next_input() {
        let fact = FixedStage::ok(StageRole::FactCheck, "checked");
        let pipeline = Pipeline::from_stages(
            FixedStage::ok(StageRole::Idea, ""),
            fact.clone(),
            FixedStage::ok(StageRole::Editor, "final"),
        );

        let result = pipeline.run("topic").await.unwrap();

        assert_eq!(fact.inputs(), vec![""]);
        assert_eq!(result.steps().len(), 3);
        assert_eq!(result.steps()[0].content(), "");
    }

    #[tokio::test]
    async fn test_repeated_runs_have_same_shape() {
        let idea = FixedStage::ok(StageRole::Idea, "draft");
        let pipeline = Pipeline::from_stages(
            idea.clone(),
            FixedStage::ok(StageRole::FactCheck, "checked"),
            FixedStage::ok(StageRole::Editor, "final"),
        );

        for _ in 0..2 {
            let result = pipeline.run("topic").await.unwrap();
            let roles: Vec<StageRole> = result.steps().iter().map(PipelineStep::role).collect();
            assert_eq!(roles, StageRole::ORDER.to_vec());
        }
        assert_eq!(idea.inputs(), vec!["topic", "topic"]);
    }

    #[tokio::test]
    async fn test_single_character_input() {
        let idea = FixedStage::ok(StageRole::Idea, "draft");
        let pipeline = Pipeline::from_stages(
            idea.clone(),
            FixedStage::ok(StageRole::FactCheck, "checked"),
            FixedStage::ok(StageRole::Editor, "final"),
        );

        let result = pipeline.run("a").await.unwrap();

        assert_eq!(idea.inputs(), vec!["a"]);
        assert_eq!(result.final_text(), "final");
    }

    #[tokio::test]
    async fn test_steps_labelled_by_stage_role() {
        let pipeline = Pipeline::from_stages(
            FixedStage::ok(StageRole::Idea, "draft"),
            FixedStage::ok(StageRole::Editor, "polished"),
            FixedStage::ok(StageRole::FactCheck, "checked"),
        );

        let result = pipeline.run("topic").await.unwrap();

        let roles: Vec<StageRole> = result.steps().iter().map(PipelineStep::role).collect();
        assert_eq!(
            roles,
            vec![StageRole::Idea, StageRole::Editor, StageRole::FactCheck]
        );
    }
}
