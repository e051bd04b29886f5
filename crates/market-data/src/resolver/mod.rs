//! Company name to ticker symbol resolution.
//!
//! # Overview
//!
//! A company name (as produced by the taxonomy step, e.g. "Alphabet Inc.")
//! is turned into a provider search term by [`NameNormalizer`], searched
//! through a [`crate::provider::MarketDataProvider`], and the candidates are
//! ranked by [`SearchSymbolResolver`]:
//!
//! | Tier | Rule |
//! |------|------|
//! | `Known` | Hard-coded name table hit, no provider call |
//! | `Exact` | Domestic common stock whose description contains the name |
//! | `Partial` | Domestic common stock sharing over half the query tokens |
//! | `Fallback` | Any common stock, listing suffix or not |
//!
//! The first tier with a candidate wins; within a tier the provider's order
//! decides.

mod normalizer;
mod symbol_resolver;
mod traits;

pub use normalizer::{NameNormalizer, COMPANY_SUFFIXES, DEFAULT_ALIASES, KNOWN_TICKERS};
pub use symbol_resolver::SearchSymbolResolver;
pub use traits::{MatchTier, NameResolver, ResolvedSymbol};
