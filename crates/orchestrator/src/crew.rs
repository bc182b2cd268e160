//! Fan-out coordinator.
//!
//! Dispatches every configured role against the same topic concurrently,
//! collects each outcome independently, and folds them into one `RunResult`.
//! A single role failing never aborts the others or the run.

use std::collections::BTreeMap;
use std::sync::Arc;

use draftcrew_core::{Role, RunResult, TaskResult};
use events::{Event, EventBus, EventEnvelope};
use provider::TextGenerator;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};
use crate::executor::RoleExecutor;
use crate::roles;
use crate::run_log::RunLog;

pub use crate::roles::DEFAULT_FINAL_ROLE;

/// Static crew configuration: the role set and the role whose output is the
/// final article.
#[derive(Debug, Clone)]
pub struct CrewConfig {
    pub roles: Vec<Role>,
    pub final_role: String,
}

impl CrewConfig {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles,
            final_role: DEFAULT_FINAL_ROLE.to_string(),
        }
    }

    /// The built-in planner/writer/editor/SEO crew.
    pub fn builtin() -> Self {
        Self::new(roles::builtin_crew())
    }

    pub fn with_final_role(mut self, final_role: impl Into<String>) -> Self {
        self.final_role = final_role.into();
        self
    }
}

/// Fan-out coordinator over a fixed set of roles.
pub struct Crew {
    config: CrewConfig,
    executor: RoleExecutor,
    event_bus: EventBus,
}

impl Crew {
    /// Build a crew from validated configuration.
    ///
    /// Malformed role descriptors are rejected here, before any run; an
    /// empty role set is allowed at construction and rejected by `run`.
    pub fn new(
        config: CrewConfig,
        generator: Arc<dyn TextGenerator>,
        event_bus: EventBus,
    ) -> Result<Self> {
        for role in &config.roles {
            role.validate()?;
        }
        Ok(Self {
            config,
            executor: RoleExecutor::new(generator),
            event_bus,
        })
    }

    pub fn roles(&self) -> &[Role] {
        &self.config.roles
    }

    pub fn final_role(&self) -> &str {
        &self.config.final_role
    }

    /// Run every role concurrently against `topic` and aggregate the
    /// outcomes.
    ///
    /// All role tasks are spawned before any is awaited and completions are
    /// consumed in completion order; the result is produced only once every
    /// role is terminal. The returned mapping always holds exactly one entry
    /// per configured role.
    pub async fn run(&self, topic: &str) -> Result<RunResult> {
        if self.config.roles.is_empty() {
            return Err(OrchestratorError::NoRolesConfigured);
        }

        let run_id = Uuid::new_v4();
        let log = RunLog::new();

        info!(%run_id, topic, roles = self.config.roles.len(), "Starting crew run");
        log.push(format!(
            "run {run_id}: dispatching {} roles for topic \"{topic}\"",
            self.config.roles.len()
        ));
        self.event_bus.publish(EventEnvelope::new(Event::RunStarted {
            run_id,
            topic: topic.to_string(),
            role_count: self.config.roles.len(),
        }));

        let mut tasks = JoinSet::new();
        for role in &self.config.roles {
            tasks.spawn(Self::run_role(
                self.executor.clone(),
                role.clone(),
                topic.to_string(),
                run_id,
                self.event_bus.clone(),
                log.clone(),
            ));
        }

        let mut results: BTreeMap<String, TaskResult> = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    results.insert(result.role.clone(), result);
                }
                Err(e) => {
                    // A panicked role task must still not abort the run; the
                    // missing entry is repaired below.
                    warn!(%run_id, error = %e, "Role task panicked");
                    self.event_bus.publish(EventEnvelope::new(Event::Error {
                        message: format!("role task aborted: {e}"),
                        context: Some(format!("run {run_id}")),
                    }));
                }
            }
        }

        // Invariant: one entry per configured role, failures included.
        for role in &self.config.roles {
            if !results.contains_key(&role.name) {
                let text = format!("Role '{}' failed: execution aborted", role.name);
                log.push(text.clone());
                results.insert(role.name.clone(), TaskResult::failed(&role.name, text));
            }
        }

        let final_output = RunResult::select_final_output(&results, &self.config.final_role);

        let succeeded = results
            .values()
            .filter(|r| r.status == draftcrew_core::RoleStatus::Succeeded)
            .count();
        let failed = results.len() - succeeded;

        log.push(format!(
            "run {run_id}: complete ({succeeded} succeeded, {failed} failed)"
        ));
        self.event_bus
            .publish(EventEnvelope::new(Event::RunCompleted {
                run_id,
                succeeded,
                failed,
            }));
        info!(%run_id, succeeded, failed, "Crew run complete");

        Ok(RunResult {
            topic: topic.to_string(),
            results,
            final_output,
            logs: log.snapshot(),
        })
    }

    /// Execute one role to a terminal state. Never returns an error: a
    /// failure becomes a failed `TaskResult` carrying the error description.
    async fn run_role(
        executor: RoleExecutor,
        role: Role,
        topic: String,
        run_id: Uuid,
        event_bus: EventBus,
        log: RunLog,
    ) -> TaskResult {
        log.push(format!("[{}] started", role.name));
        event_bus.publish(EventEnvelope::new(Event::RoleStarted {
            run_id,
            role: role.name.clone(),
        }));

        match executor.execute(&role, &topic).await {
            Ok(text) => {
                log.push(format!(
                    "[{}] succeeded ({} chars)",
                    role.name,
                    text.len()
                ));
                event_bus.publish(EventEnvelope::new(Event::RoleCompleted {
                    run_id,
                    role: role.name.clone(),
                    text_length: text.len(),
                }));
                TaskResult::succeeded(&role.name, text)
            }
            Err(e) => {
                let error_text = format!("Role '{}' failed: {}", role.name, e);
                warn!(%run_id, role = %role.name, "{error_text}");
                log.push(format!("[{}] {error_text}", role.name));
                event_bus.publish(EventEnvelope::new(Event::RoleFailed {
                    run_id,
                    role: role.name.clone(),
                    error: e.to_string(),
                }));
                TaskResult::failed(&role.name, error_text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use draftcrew_core::{RoleStatus, NO_FINAL_OUTPUT};
    use provider::{ProviderError, ProviderResult};
    use std::time::{Duration, Instant};

    /// Echoes the user prompt so each role produces distinct text.
    struct EchoStub;

    #[async_trait]
    impl TextGenerator for EchoStub {
        async fn generate(&self, _: &str, user_prompt: &str) -> ProviderResult<String> {
            Ok(format!("echo: {user_prompt}"))
        }
    }

    /// Fails with a network-style error when the prompt starts with FAIL,
    /// and with a malformed-response error when it starts with MALFORMED.
    struct SelectiveStub;

    #[async_trait]
    impl TextGenerator for SelectiveStub {
        async fn generate(&self, _: &str, user_prompt: &str) -> ProviderResult<String> {
            if user_prompt.starts_with("FAIL") {
                Err(ProviderError::generation("connection refused"))
            } else if user_prompt.starts_with("MALFORMED") {
                Err(ProviderError::MalformedResponse(
                    "first candidate is missing the message content field".to_string(),
                ))
            } else {
                Ok(format!("ok: {user_prompt}"))
            }
        }
    }

    /// Sleeps before answering, for the wall-clock concurrency check.
    struct SleepingStub;

    #[async_trait]
    impl TextGenerator for SleepingStub {
        async fn generate(&self, _: &str, user_prompt: &str) -> ProviderResult<String> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(format!("slow: {user_prompt}"))
        }
    }

    fn test_role(name: &str, goal_prefix: &str) -> Role {
        Role::new(
            name,
            format!("{name} persona"),
            "You work on {topic}.",
            format!("{goal_prefix} {{topic}}"),
        )
    }

    fn crew_with(
        roles: Vec<Role>,
        generator: Arc<dyn TextGenerator>,
    ) -> Crew {
        Crew::new(CrewConfig::new(roles), generator, EventBus::new()).unwrap()
    }

    #[tokio::test]
    async fn test_builtin_crew_happy_path() {
        let crew = Crew::new(CrewConfig::builtin(), Arc::new(EchoStub), EventBus::new()).unwrap();
        let run = crew.run("The impact of AI on healthcare").await.unwrap();

        let keys: Vec<&str> = run.results.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["edit", "keyword_research", "plan", "write"]);

        for result in run.results.values() {
            assert_eq!(result.status, RoleStatus::Succeeded);
            assert!(result.text.starts_with("echo: "));
        }
        assert_eq!(run.final_output, run.results["write"].text);
        assert_eq!(run.topic, "The impact of AI on healthcare");
    }

    #[tokio::test]
    async fn test_every_role_has_an_entry_despite_failures() {
        let roles = vec![
            test_role("plan", "Plan"),
            test_role("write", "FAIL write about"),
            test_role("edit", "MALFORMED edit"),
            test_role("keyword_research", "Research keywords for"),
        ];
        let crew = crew_with(roles, Arc::new(SelectiveStub));
        let run = crew.run("rust").await.unwrap();

        assert_eq!(run.results.len(), 4);
        assert_eq!(run.results["plan"].status, RoleStatus::Succeeded);
        assert_eq!(run.results["write"].status, RoleStatus::Failed);
        assert_eq!(run.results["edit"].status, RoleStatus::Failed);
        assert_eq!(
            run.results["keyword_research"].status,
            RoleStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_failure_texts_distinguish_error_kinds() {
        let roles = vec![
            test_role("write", "FAIL write about"),
            test_role("edit", "MALFORMED edit"),
        ];
        let crew = crew_with(roles, Arc::new(SelectiveStub));
        let run = crew.run("rust").await.unwrap();

        let network = &run.results["write"].text;
        assert!(network.starts_with("Role 'write' failed:"));
        assert!(network.contains("Generation failed"));

        let malformed = &run.results["edit"].text;
        assert!(malformed.starts_with("Role 'edit' failed:"));
        assert!(malformed.contains("Malformed provider response"));
    }

    #[tokio::test]
    async fn test_final_output_falls_back_when_writer_fails() {
        let roles = vec![
            test_role("plan", "Plan"),
            test_role("write", "FAIL write about"),
        ];
        let crew = crew_with(roles, Arc::new(SelectiveStub));
        let run = crew.run("rust").await.unwrap();

        assert_eq!(run.final_output, NO_FINAL_OUTPUT);
    }

    #[tokio::test]
    async fn test_empty_role_set_fails_before_scheduling() {
        let crew = crew_with(Vec::new(), Arc::new(EchoStub));
        let err = crew.run("rust").await.unwrap_err();
        assert!(matches!(err, OrchestratorError::NoRolesConfigured));
    }

    #[tokio::test]
    async fn test_malformed_role_rejected_at_construction() {
        let mut role = test_role("plan", "Plan");
        role.goal_template = "no placeholder here".to_string();
        let result = Crew::new(
            CrewConfig::new(vec![role]),
            Arc::new(EchoStub),
            EventBus::new(),
        );
        assert!(matches!(result, Err(OrchestratorError::InvalidRole(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_roles_run_concurrently_not_sequentially() {
        let roles = vec![
            test_role("plan", "Plan"),
            test_role("write", "Write about"),
            test_role("edit", "Edit"),
            test_role("keyword_research", "Research keywords for"),
        ];
        let crew = crew_with(roles, Arc::new(SleepingStub));

        let started = Instant::now();
        let run = crew.run("rust").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(run.results.len(), 4);
        assert!(elapsed >= Duration::from_millis(100));
        // Sequential execution would take ~400ms.
        assert!(
            elapsed < Duration::from_millis(300),
            "fan-out took {elapsed:?}, expected ~100ms"
        );
    }

    #[tokio::test]
    async fn test_run_publishes_lifecycle_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let crew = Crew::new(CrewConfig::builtin(), Arc::new(EchoStub), bus).unwrap();

        crew.run("rust").await.unwrap();

        let mut started = 0;
        let mut role_terminal = 0;
        let mut run_started = 0;
        let mut run_completed = 0;
        while let Ok(envelope) = rx.try_recv() {
            match envelope.event {
                Event::RunStarted { role_count, .. } => {
                    run_started += 1;
                    assert_eq!(role_count, 4);
                }
                Event::RoleStarted { .. } => started += 1,
                Event::RoleCompleted { .. } | Event::RoleFailed { .. } => role_terminal += 1,
                Event::RunCompleted {
                    succeeded, failed, ..
                } => {
                    run_completed += 1;
                    assert_eq!(succeeded, 4);
                    assert_eq!(failed, 0);
                }
                Event::Error { .. } => {}
            }
        }
        assert_eq!(run_started, 1);
        assert_eq!(started, 4);
        assert_eq!(role_terminal, 4);
        assert_eq!(run_completed, 1);
    }

    /// Panics when the prompt starts with PANIC, otherwise succeeds.
    struct PanickingStub;

    #[async_trait]
    impl TextGenerator for PanickingStub {
        async fn generate(&self, _: &str, user_prompt: &str) -> ProviderResult<String> {
            if user_prompt.starts_with("PANIC") {
                panic!("stub blew up");
            }
            Ok(format!("ok: {user_prompt}"))
        }
    }

    #[tokio::test]
    async fn test_aborted_role_task_is_repaired_and_reported() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let roles = vec![
            test_role("plan", "Plan"),
            test_role("write", "PANIC write about"),
        ];
        let crew = Crew::new(CrewConfig::new(roles), Arc::new(PanickingStub), bus).unwrap();

        let run = crew.run("rust").await.unwrap();

        // The aborted role still has an entry and the run completes.
        assert_eq!(run.results.len(), 2);
        assert_eq!(run.results["plan"].status, RoleStatus::Succeeded);
        assert_eq!(run.results["write"].status, RoleStatus::Failed);
        assert!(run.results["write"].text.contains("execution aborted"));
        assert_eq!(run.final_output, NO_FINAL_OUTPUT);

        let mut error_events = 0;
        while let Ok(envelope) = rx.try_recv() {
            if let Event::Error { message, .. } = envelope.event {
                error_events += 1;
                assert!(message.contains("aborted"));
            }
        }
        assert_eq!(error_events, 1);
    }

    #[tokio::test]
    async fn test_run_log_captures_role_lines() {
        let crew = Crew::new(CrewConfig::builtin(), Arc::new(EchoStub), EventBus::new()).unwrap();
        let run = crew.run("rust").await.unwrap();

        assert!(run.logs.contains("dispatching 4 roles"));
        for name in ["plan", "write", "edit", "keyword_research"] {
            assert!(run.logs.contains(&format!("[{name}] started")));
            assert!(run.logs.contains(&format!("[{name}] succeeded")));
        }
        assert!(run.logs.contains("4 succeeded, 0 failed"));
    }
}
