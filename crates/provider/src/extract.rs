//! Single conversion point from raw provider responses to text.
//!
//! Provider revisions have shipped diverging response shapes; everything
//! downstream goes through `extract_text` so a shape change touches exactly
//! one function.

use crate::error::{ProviderError, ProviderResult};
use crate::types::ChatCompletionResponse;

/// Extract the primary generated text from the first candidate.
///
/// An empty candidate list is a generation failure (the provider produced
/// nothing); a candidate without the expected text field is a malformed
/// response (the provider produced something we cannot parse).
pub fn extract_text(response: &ChatCompletionResponse) -> ProviderResult<String> {
    let Some(first) = response.choices.first() else {
        return Err(ProviderError::generation("provider returned no candidates"));
    };

    first
        .message
        .as_ref()
        .and_then(|m| m.content.as_ref())
        .cloned()
        .ok_or_else(|| {
            ProviderError::MalformedResponse(
                "first candidate is missing the message content field".to_string(),
            )
        })
}
