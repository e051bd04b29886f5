//! What a provider offers and how often it may be called.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Name-to-symbol search
    pub supports_search: bool,

    /// Symbol-to-profile lookup
    pub supports_profile: bool,
}

/// At most `max_calls` requests in any `window`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Maximum calls allowed per window.
    pub max_calls: u32,

    /// Length of the window the cap applies to.
    pub window: Duration,
}

impl RateLimit {
    /// A cap of `max_calls` per minute.
    pub const fn per_minute(max_calls: u32) -> Self {
        Self {
            max_calls,
            window: Duration::from_secs(60),
        }
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::per_minute(45)
    }
}
