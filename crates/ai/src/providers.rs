//! rig-core client factories for the OpenAI-compatible endpoints we call.

use reqwest::Client as HttpClient;
use rig::providers::openai;

use crate::error::AiError;

pub const OPENAI_PROVIDER_ID: &str = "openai";
pub const PERPLEXITY_PROVIDER_ID: &str = "perplexity";

/// Perplexity speaks the OpenAI chat completions protocol at this root.
pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// Model used for subsector company lists; it must support JSON-schema
/// structured output.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-2024-08-06";

/// Online model used for ticker lookups.
pub const DEFAULT_PERPLEXITY_MODEL: &str = "llama-3.1-sonar-large-128k-online";

fn require_key(api_key: Option<String>, provider_id: &str) -> Result<String, AiError> {
    api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| AiError::MissingApiKey(provider_id.to_string()))
}

/// Create OpenAI client using the Completions API (not the Responses API);
/// `response_format` is passed through as a completions request field.
pub fn create_openai_client(
    api_key: Option<String>,
) -> Result<openai::CompletionsClient<HttpClient>, AiError> {
    let key = require_key(api_key, OPENAI_PROVIDER_ID)?;
    openai::CompletionsClient::builder()
        .api_key(&key)
        .build()
        .map_err(|e| AiError::Provider(e.to_string()))
}

/// Create a completions client pointed at Perplexity.
pub fn create_perplexity_client(
    api_key: Option<String>,
) -> Result<openai::CompletionsClient<HttpClient>, AiError> {
    let key = require_key(api_key, PERPLEXITY_PROVIDER_ID)?;
    openai::CompletionsClient::builder()
        .api_key(&key)
        .base_url(PERPLEXITY_BASE_URL)
        .build()
        .map_err(|e| AiError::Provider(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_rejected() {
        let err = create_openai_client(None).err().unwrap();
        assert!(matches!(err, AiError::MissingApiKey(ref id) if id == "openai"));

        let err = create_perplexity_client(Some("  ".to_string())).err().unwrap();
        assert!(matches!(err, AiError::MissingApiKey(ref id) if id == "perplexity"));
    }

    #[test]
    fn test_clients_build_with_key() {
        assert!(create_openai_client(Some("sk-test".to_string())).is_ok());
        assert!(create_perplexity_client(Some("pplx-test".to_string())).is_ok());
    }
}
