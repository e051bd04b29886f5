//! Tickermap Core - taxonomy enrichment and ticker mapping.
//!
//! This crate holds the pipeline's domain models, services and traits.
//! LLM-backed implementations of [`enrichment::CompanyListGenerator`] and
//! [`resolution::BatchTickerLookup`] live in the `tickermap-ai` crate;
//! market data providers and the symbol resolver in `tickermap-market-data`.

pub mod constants;
pub mod enrichment;
pub mod errors;
pub mod mappings;
pub mod profiles;
pub mod resolution;
pub mod taxonomies;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
