pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod types;

use async_trait::async_trait;

pub use client::GroqClient;
pub use config::{ConfigError, ProviderSettings};
pub use error::{ProviderError, ProviderResult};
pub use extract::extract_text;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// The one seam between role execution and the hosted model.
///
/// `GroqClient` is the production implementation; tests substitute stubs that
/// succeed, fail, or sleep without touching the network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue exactly one generation request and return the primary text of
    /// the first candidate, unmodified.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> ProviderResult<String>;
}
