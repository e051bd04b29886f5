//! Resolution traits for the market data crate.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Which ranking rule produced a resolved symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Taken from the known-ticker table without a provider call.
    Known,
    /// Domestic common stock whose description contains the name.
    Exact,
    /// Domestic common stock with enough token overlap.
    Partial,
    /// First common stock of any listing.
    Fallback,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Known => "known",
            Self::Exact => "exact",
            Self::Partial => "partial",
            Self::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// A ticker chosen for a company name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// The selected ticker (e.g., "GOOGL", "SHOP.TO")
    pub symbol: String,
    /// The rule that selected it
    pub tier: MatchTier,
    /// The term that was sent to the provider
    pub search_term: String,
}

/// Resolves a company name to a ticker symbol.
///
/// `Ok(None)` means the name was searched but no candidate qualified.
/// Provider failures come back as `Err` so batch callers can log them and
/// move on to the next name.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, company_name: &str) -> Result<Option<ResolvedSymbol>, MarketDataError>;
}
