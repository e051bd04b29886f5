//! Company-data sources (Finnhub, Yahoo) behind one trait.
//!
//! Providers are plain request/response wrappers. Throttling lives in
//! [`crate::rate_limit::RateLimitedClient`], which wraps any provider.

mod capabilities;
mod traits;

pub mod finnhub;
pub mod yahoo;

pub use capabilities::{ProviderCapabilities, RateLimit};
pub use traits::MarketDataProvider;
