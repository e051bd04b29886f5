//! Request throttling for market data providers.
//!
//! - [`FixedWindowRateLimiter`] caps calls per window and parks callers
//!   until a permit is available.
//! - [`RateLimitedClient`] wraps any [`crate::provider::MarketDataProvider`]
//!   and takes a permit before every provider call.

mod client;
mod rate_limiter;

pub use client::RateLimitedClient;
pub use rate_limiter::FixedWindowRateLimiter;
