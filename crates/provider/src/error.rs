use thiserror::Error;

/// Provider-level error taxonomy.
///
/// `Generation` covers everything that reads as "the provider did not
/// produce a candidate": transport failures, timeouts, non-success HTTP
/// statuses and empty candidate lists. `MalformedResponse` is reserved for
/// responses that contained candidates but not the expected text field, so
/// operators can tell an integration bug from an outage.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Generation failed: {message}")]
    Generation {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Generation {
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
        }
    }
}

/// Result type alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
