//! Yahoo Finance symbol search.
//!
//! Used as a search-only alternative to Finnhub: the search endpoint needs
//! no API key, but Yahoo publishes no quota, so callers should still wrap
//! it in a [`crate::rate_limit::RateLimitedClient`].

use async_trait::async_trait;
use tracing::debug;
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{SearchResult, SecurityType};
use crate::provider::{MarketDataProvider, ProviderCapabilities, RateLimit};

const PROVIDER_ID: &str = "YAHOO";

pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("cannot build Yahoo connector: {}", e),
            )
        })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supports_search: true,
            supports_profile: false,
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let encoded_query = encode(query);

        debug!("Searching Yahoo for '{}'", query);

        let result = self
            .connector
            .search_ticker(&encoded_query)
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, e.to_string()))?;

        let search_results = result
            .quotes
            .iter()
            .map(|item| {
                SearchResult::new(
                    &item.symbol,
                    clean_long_name(&item.long_name, &item.symbol),
                    &item.exchange,
                    SecurityType::parse(&item.quote_type),
                )
                .with_score(item.score)
            })
            .collect();

        Ok(search_results)
    }
}

/// Yahoo returns HTML entities in long names and leaves them blank for some
/// listings; fall back to the symbol then.
fn clean_long_name(long_name: &str, symbol: &str) -> String {
    let name = long_name.replace("&amp;", "&");
    if name.trim().is_empty() {
        symbol.trim().to_string()
    } else {
        name
    }
}
