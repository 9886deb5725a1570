// Business domains
pub mod pipeline;
