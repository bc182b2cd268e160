use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fallback text used when the designated final role did not produce output.
pub const NO_FINAL_OUTPUT: &str = "No final article generated.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoleStatus {
    #[default]
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl RoleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "succeeded" => Some(Self::Succeeded),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// A role in a terminal state will not transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Outcome of a single role execution.
///
/// On success `text` holds the generated content; on failure it holds the
/// synthesized error description for that role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskResult {
    pub role: String,
    pub status: RoleStatus,
    pub text: String,
}

impl TaskResult {
    pub fn succeeded(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            status: RoleStatus::Succeeded,
            text: text.into(),
        }
    }

    pub fn failed(role: impl Into<String>, error_text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            status: RoleStatus::Failed,
            text: error_text.into(),
        }
    }
}

/// Aggregate outcome of one fan-out invocation.
///
/// `results` always contains exactly one entry per configured role: a failing
/// role contributes an error-text entry, never an absent key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunResult {
    pub topic: String,
    pub results: BTreeMap<String, TaskResult>,
    pub final_output: String,
    pub logs: String,
}

impl RunResult {
    /// Select the final output from the designated role, falling back to the
    /// canonical placeholder when that role failed or is absent.
    pub fn select_final_output(
        results: &BTreeMap<String, TaskResult>,
        final_role: &str,
    ) -> String {
        match results.get(final_role) {
            Some(r) if r.status == RoleStatus::Succeeded => r.text.clone(),
            _ => NO_FINAL_OUTPUT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_status_round_trip() {
        for status in [
            RoleStatus::Pending,
            RoleStatus::Running,
            RoleStatus::Succeeded,
            RoleStatus::Failed,
        ] {
            assert_eq!(RoleStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RoleStatus::parse("done"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RoleStatus::Pending.is_terminal());
        assert!(!RoleStatus::Running.is_terminal());
        assert!(RoleStatus::Succeeded.is_terminal());
        assert!(RoleStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&RoleStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }

    #[test]
    fn test_select_final_output_from_succeeded_role() {
        let mut results = BTreeMap::new();
        results.insert(
            "write".to_string(),
            TaskResult::succeeded("write", "An article."),
        );
        assert_eq!(
            RunResult::select_final_output(&results, "write"),
            "An article."
        );
    }

    #[test]
    fn test_select_final_output_falls_back_on_failure() {
        let mut results = BTreeMap::new();
        results.insert(
            "write".to_string(),
            TaskResult::failed("write", "Role 'write' failed: boom"),
        );
        assert_eq!(
            RunResult::select_final_output(&results, "write"),
            NO_FINAL_OUTPUT
        );
    }

    #[test]
    fn test_select_final_output_falls_back_on_missing_role() {
        let results = BTreeMap::new();
        assert_eq!(
            RunResult::select_final_output(&results, "write"),
            NO_FINAL_OUTPUT
        );
    }
}
