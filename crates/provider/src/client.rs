use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::config::ProviderSettings;
use crate::error::{ProviderError, ProviderResult};
use crate::extract::extract_text;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ProviderErrorResponse,
};
use crate::TextGenerator;

/// Client for the Groq chat completions API.
///
/// Constructed explicitly from resolved settings and shared by `Arc`; there
/// is no process-global instance.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    settings: ProviderSettings,
}

impl GroqClient {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Send one chat completion request. No retries: a failure is captured
    /// and reported as-is.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> ProviderResult<ChatCompletionResponse> {
        let request = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: Some(self.settings.temperature),
            max_tokens: None,
        };

        debug!(model = %self.settings.model, "Sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the provider's own error message when it parses
            if let Ok(body) = serde_json::from_str::<ProviderErrorResponse>(&error_text) {
                error!(
                    status = status.as_u16(),
                    error_type = ?body.error.error_type,
                    "Groq API error: {}",
                    body.error.message
                );
                return Err(ProviderError::Generation {
                    message: body.error.message,
                    status_code: Some(status.as_u16()),
                });
            }

            error!(status = status.as_u16(), "Groq API error: {}", error_text);
            return Err(ProviderError::Generation {
                message: format!("HTTP {}: {}", status.as_u16(), error_text),
                status_code: Some(status.as_u16()),
            });
        }

        response.json::<ChatCompletionResponse>().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("failed to decode response body: {e}"))
        })
    }
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> ProviderResult<String> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];
        let response = self.chat_completion(messages).await?;
        extract_text(&response)
    }
}
