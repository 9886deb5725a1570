use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The three pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageRole {
    Idea,
    FactCheck,
    Editor,
}

impl StageRole {
    /// Fixed execution order of a pipeline run.
    pub const ORDER: [StageRole; 3] = [StageRole::Idea, StageRole::FactCheck, StageRole::Editor];

    /// Display label sent to clients.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idea => "Idea Agent",
            Self::FactCheck => "FactCheck Agent",
            Self::Editor => "Editor Agent",
        }
    }

    /// Display color sent to clients.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Idea => "#FFC107",
            Self::FactCheck => "#03A9F4",
            Self::Editor => "#8BC34A",
        }
    }
}

impl fmt::Display for StageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One stage's contribution to the trace. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    role: StageRole,
    content: String,
}

impl PipelineStep {
    pub fn new(role: StageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> StageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Wire shape: `{"role": <label>, "color": <hex>, "content": <text>}`
impl Serialize for PipelineStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PipelineStep", 3)?;
        state.serialize_field("role", self.role.label())?;
        state.serialize_field("color", self.role.color())?;
        state.serialize_field("content", &self.content)?;
        state.end()
    }
}

/// The trace of a successful run: one step per stage, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    steps: Vec<PipelineStep>,
}

impl PipelineResult {
    pub(crate) fn new(steps: Vec<PipelineStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Content of the last stage, i.e. the finished text.
    pub fn final_text(&self) -> &str {
        self.steps.last().map(PipelineStep::content).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_idea_factcheck_editor() {
        let labels: Vec<&str> = StageRole::ORDER.iter().map(StageRole::label).collect();
        assert_eq!(labels, vec!["Idea Agent", "FactCheck Agent", "Editor Agent"]);
    }

    #[test]
    fn test_step_wire_shape() {
        let step = PipelineStep::new(StageRole::FactCheck, "Checked.\n\nNote: nothing changed.");
        let value = serde_json::to_value(&step).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "role": "FactCheck Agent",
                "color": "#03A9F4",
                "content": "Checked.\n\nNote: nothing changed."
            })
        );
    }

    #[test]
    fn test_result_wire_shape() {
        let result = PipelineResult::new(vec![
            PipelineStep::new(StageRole::Idea, "a"),
            PipelineStep::new(StageRole::FactCheck, ""),
            PipelineStep::new(StageRole::Editor, "c"),
        ]);
        let value = serde_json::to_value(&result).unwrap();

        let steps = value["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1]["content"], "");
        assert_eq!(steps[2]["color"], "#8BC34A");
        assert_eq!(result.final_text(), "c");
    }
}
