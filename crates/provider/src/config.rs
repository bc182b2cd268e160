use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

const API_KEY_VAR: &str = "GROQ_API_KEY";
const MODEL_VAR: &str = "GROQ_MODEL";
const BASE_URL_VAR: &str = "GROQ_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set; the crew cannot run without a provider credential")]
    MissingApiKey,
}

/// Resolved provider configuration.
///
/// Constructed once at process start and passed by reference; a missing
/// credential is fatal before any run is attempted.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read settings from the environment, failing fast when the credential
    /// is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut settings = Self::new(api_key);
        if let Ok(model) = std::env::var(MODEL_VAR) {
            if !model.trim().is_empty() {
                settings.model = model;
            }
        }
        if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
            if !base_url.trim().is_empty() {
                settings.base_url = base_url;
            }
        }
        Ok(settings)
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ProviderSettings::new("gsk_test");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.temperature, 0.0);
    }

    #[test]
    fn test_builder_overrides() {
        let settings = ProviderSettings::new("gsk_test")
            .with_model("llama-3.3-70b-versatile")
            .with_base_url("http://localhost:9999/v1");
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = ProviderSettings::new("gsk_very_secret");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("gsk_very_secret"));
        assert!(debug.contains("***"));
    }
}
