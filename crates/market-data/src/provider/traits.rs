//! The seam every company-data source plugs into.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{CompanyProfile, SearchResult};

use super::capabilities::{ProviderCapabilities, RateLimit};

/// A source of symbol candidates and, optionally, company profiles.
///
/// Resolution only calls `search`. Sources without profile data keep the
/// default `get_profile`, which reports `NotSupported`.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Upper-case tag used in logs and errors ("FINNHUB", "YAHOO").
    fn id(&self) -> &'static str;

    fn capabilities(&self) -> ProviderCapabilities;

    /// Cap applied by [`crate::rate_limit::RateLimitedClient`].
    fn rate_limit(&self) -> RateLimit;

    /// Candidates for a company name, in the provider's ranking order.
    /// Resolver tiers pick the first qualifying entry, so order is kept.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError>;

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }
}
