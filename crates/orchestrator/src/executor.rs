//! Role executor: one role, one generation request.

use std::sync::Arc;

use draftcrew_core::Role;
use provider::{ProviderResult, TextGenerator};
use tracing::debug;

/// Executes a single role against the text-generation provider.
///
/// Stateless apart from the shared generator handle: substitutes the topic
/// into the role's goal template, issues exactly one request, and returns
/// the extracted text untouched. Error classification happens inside the
/// provider; nothing is retried here.
#[derive(Clone)]
pub struct RoleExecutor {
    generator: Arc<dyn TextGenerator>,
}

impl RoleExecutor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self, role: &Role, topic: &str) -> ProviderResult<String> {
        let system_prompt = role.system_prompt(topic);
        let goal = role.render_goal(topic);

        debug!(
            role = %role.name,
            prompt_length = goal.len(),
            "Executing role"
        );

        self.generator.generate(&system_prompt, &goal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use provider::ProviderError;
    use std::sync::Mutex;

    /// Records the prompts it was called with and echoes the user prompt.
    struct RecordingStub {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingStub {
        async fn generate(
            &self,
            system_prompt: &str,
            user_prompt: &str,
        ) -> ProviderResult<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            Ok(format!("echo: {user_prompt}"))
        }
    }

    struct NetworkFailureStub;

    #[async_trait]
    impl TextGenerator for NetworkFailureStub {
        async fn generate(&self, _: &str, _: &str) -> ProviderResult<String> {
            Err(ProviderError::generation("connection refused"))
        }
    }

    fn writer_role() -> Role {
        Role::new(
            "write",
            "Content Writer",
            "You write opinion pieces about {topic}.",
            "Write an opinion piece on the topic: {topic}.",
        )
    }

    #[tokio::test]
    async fn test_execute_substitutes_topic_into_prompts() {
        let stub = Arc::new(RecordingStub {
            calls: Mutex::new(Vec::new()),
        });
        let executor = RoleExecutor::new(stub.clone());

        let text = executor.execute(&writer_role(), "rust").await.unwrap();
        assert_eq!(text, "echo: Write an opinion piece on the topic: rust.");

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("Content Writer"));
        assert!(calls[0].0.contains("about rust"));
    }

    #[tokio::test]
    async fn test_execute_passes_empty_topic_verbatim() {
        let stub = Arc::new(RecordingStub {
            calls: Mutex::new(Vec::new()),
        });
        let executor = RoleExecutor::new(stub.clone());

        executor.execute(&writer_role(), "").await.unwrap();
        let calls = stub.calls.lock().unwrap();
        assert!(calls[0].1.contains("the topic: ."));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates_as_generation_error() {
        let executor = RoleExecutor::new(Arc::new(NetworkFailureStub));
        let err = executor.execute(&writer_role(), "rust").await.unwrap_err();
        assert!(matches!(err, ProviderError::Generation { .. }));
    }
}
