use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{CompanyProfile, SearchResult};
use crate::provider::{MarketDataProvider, ProviderCapabilities, RateLimit};

use super::FixedWindowRateLimiter;

/// A provider that waits for a rate limit permit before every call.
///
/// The limiter is shared through an `Arc` so that several clients (for
/// example one per task) can draw from the same budget.
pub struct RateLimitedClient<P> {
    inner: P,
    limiter: Arc<FixedWindowRateLimiter>,
}

impl<P: MarketDataProvider> RateLimitedClient<P> {
    /// Wrap `inner` with a limiter built from its own [`RateLimit`].
    pub fn new(inner: P) -> Self {
        let limiter = Arc::new(FixedWindowRateLimiter::from_limit(&inner.rate_limit()));
        Self { inner, limiter }
    }

    /// Wrap `inner` with an existing limiter.
    pub fn with_limiter(inner: P, limiter: Arc<FixedWindowRateLimiter>) -> Self {
        Self { inner, limiter }
    }

    pub fn limiter(&self) -> &Arc<FixedWindowRateLimiter> {
        &self.limiter
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for RateLimitedClient<P> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.inner.capabilities()
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_calls: self.limiter.capacity(),
            window: self.limiter.window(),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        self.limiter.acquire().await;
        self.inner.search(query).await
    }

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        self.limiter.acquire().await;
        self.inner.get_profile(symbol).await
    }
}
