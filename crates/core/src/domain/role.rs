use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;

/// Placeholder substituted with the user topic when rendering a goal template.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Immutable descriptor for one agent role.
///
/// A role pairs a persona (sent as the system message) with a goal template
/// containing the `{topic}` placeholder. Roles are built once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Role {
    /// Short stable identifier, e.g. "plan" or "write"
    pub name: String,
    /// Human-readable persona, e.g. "Content Planner"
    pub persona: String,
    /// System-prompt backstory for the role
    pub backstory: String,
    /// Goal template with the `{topic}` placeholder
    pub goal_template: String,
}

impl Role {
    pub fn new(
        name: impl Into<String>,
        persona: impl Into<String>,
        backstory: impl Into<String>,
        goal_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            persona: persona.into(),
            backstory: backstory.into(),
            goal_template: goal_template.into(),
        }
    }

    /// Check that the descriptor is usable: non-empty name and a goal
    /// template that actually references the topic.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("role name cannot be empty".into()));
        }
        if !self.goal_template.contains(TOPIC_PLACEHOLDER) {
            return Err(CoreError::Validation(format!(
                "goal template for role '{}' is missing the {} placeholder",
                self.name, TOPIC_PLACEHOLDER
            )));
        }
        Ok(())
    }

    /// Render the goal template for a concrete topic.
    ///
    /// The topic is substituted verbatim; an empty topic is accepted and
    /// passed through unchanged. Input validation is the caller's job.
    pub fn render_goal(&self, topic: &str) -> String {
        self.goal_template.replace(TOPIC_PLACEHOLDER, topic)
    }

    /// System message sent alongside the rendered goal.
    pub fn system_prompt(&self, topic: &str) -> String {
        format!(
            "You are a {persona}. {backstory}",
            persona = self.persona,
            backstory = self.backstory.replace(TOPIC_PLACEHOLDER, topic),
        )
    }
}
