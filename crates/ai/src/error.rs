//! LLM client error types.

use thiserror::Error;
use tickermap_core::Error as CoreError;

/// Errors from the LLM-backed generators and lookups.
#[derive(Debug, Error)]
pub enum AiError {
    /// No key configured for the named provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Transport or API failure reported by rig.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model answered with something we could not use.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        CoreError::Provider(err.to_string())
    }
}
