//! Tickermap Market Data Crate
//!
//! Provider access and ticker resolution for the tickermap pipeline.
//!
//! # Overview
//!
//! - Providers: Finnhub (search and company profiles), Yahoo Finance (search)
//! - A fixed-window rate limiter and a client wrapper that applies it
//! - Company name to ticker resolution with tiered candidate ranking
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Company name    |  ("Alphabet Inc.")
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  NameNormalizer  |  (suffixes, aliases -> "google")
//! +------------------+
//!          |
//!          v
//! +--------------------+
//! | RateLimitedClient  |  (45 calls / minute)
//! +--------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (Finnhub, Yahoo)
//! +------------------+
//!          |
//!          v
//! +----------------------+
//! | SearchSymbolResolver |  (exact / partial / fallback tiers)
//! +----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SearchResult`] - A provider search candidate
//! - [`CompanyProfile`] - Provider-sourced company profile
//! - [`ResolvedSymbol`] - A ticker chosen for a company name
//! - [`MarketDataError`] - Errors returned by providers and the resolver

pub mod errors;
pub mod models;
pub mod provider;
pub mod rate_limit;
pub mod resolver;

pub use errors::MarketDataError;

pub use models::{format_market_cap, CompanyProfile, SearchResult, SecurityType};

// Re-export provider types
pub use provider::finnhub::FinnhubProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{MarketDataProvider, ProviderCapabilities, RateLimit};

pub use rate_limit::{FixedWindowRateLimiter, RateLimitedClient};

pub use resolver::{
    MatchTier, NameNormalizer, NameResolver, ResolvedSymbol, SearchSymbolResolver,
    DEFAULT_ALIASES, KNOWN_TICKERS,
};
