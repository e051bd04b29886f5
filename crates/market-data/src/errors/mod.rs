//! [`MarketDataError`] is returned by every provider call and by the symbol
//! resolver. Callers in the batch layers decide whether an error halts the
//! run or is logged and skipped; nothing in this crate retries on its own.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No data for this symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429, or 403 on quota).
    #[error("Rate limited: {provider}")]
    RateLimited {
        provider: String,
    },

    #[error("Timeout: {provider}")]
    Timeout {
        provider: String,
    },

    /// Non-success answer or unusable body.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        provider: String,
        message: String,
    },

    /// The provider does not implement the requested operation.
    #[error("Operation '{operation}' not supported by {provider}")]
    NotSupported {
        /// The operation that was requested (e.g. "profile")
        operation: String,
        /// The provider that lacks it
        provider: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Shorthand for a [`MarketDataError::ProviderError`].
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Whether waiting before the next call to the same provider is likely
    /// to help.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout { .. })
    }
}
