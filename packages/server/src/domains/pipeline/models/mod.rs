pub mod pipeline_step;
pub mod references;

pub use pipeline_step::{PipelineResult, PipelineStep, StageRole};
pub use references::{ExtractedReferences, GroundingResult};
