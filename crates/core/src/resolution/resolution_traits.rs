//! Traits for batch ticker lookup.

use async_trait::async_trait;

use crate::Result;

use super::{TickerLookupResult, UnmappedCompany};

/// Looks up tickers for several companies in one request.
///
/// Implementations return whatever the backend answered, which may cover
/// only part of the batch. `Err` means the request itself failed.
#[async_trait]
pub trait BatchTickerLookup: Send + Sync {
    async fn lookup_batch(&self, companies: &[UnmappedCompany]) -> Result<Vec<TickerLookupResult>>;
}
