//! Collaborative writing pipeline
//!
//! Idea → FactCheck → Editor. The FactCheck stage extracts references with a
//! structured call, grounds them with web search and rewrites the draft.

pub mod activities;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod stages;

pub use activities::{GroundingClient, GroundingConfig};
pub use errors::PipelineError;
pub use models::{ExtractedReferences, GroundingResult, PipelineResult, PipelineStep, StageRole};
pub use orchestrator::{is_termination_token, Pipeline};
pub use stages::{FactCheckOutcome, FactCheckStage, InstructedStage, Stage};
