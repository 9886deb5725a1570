//! Pipeline stages
//!
//! A stage takes the previous stage's text and returns its own. The Idea and
//! Editor stages are single completions; FactCheck runs extract, ground and
//! rewrite.

mod fact_check;
mod instructed;

pub use fact_check::{FactCheckOutcome, FactCheckStage};
pub use instructed::InstructedStage;

use async_trait::async_trait;

use super::errors::PipelineError;
use super::models::StageRole;

#[async_trait]
pub trait Stage: Send + Sync {
    fn role(&self) -> StageRole;

    async fn run(&self, input: &str) -> Result<String, PipelineError>;
}
