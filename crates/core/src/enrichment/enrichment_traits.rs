use async_trait::async_trait;

use crate::taxonomies::Company;
use crate::Result;

/// Produces the largest companies of a subsector.
#[async_trait]
pub trait CompanyListGenerator: Send + Sync {
    /// Companies of `subsector` within `sector`, largest first. Callers
    /// expect exactly [`crate::constants::COMPANIES_PER_SUBSECTOR`] entries.
    async fn top_companies(&self, sector: &str, subsector: &str) -> Result<Vec<Company>>;
}
