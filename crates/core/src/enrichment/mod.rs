//! Enrichment module - filling a sector outline with top companies.

mod enrichment_service;
mod enrichment_traits;

pub use enrichment_service::{placeholder_companies, EnrichmentService};
pub use enrichment_traits::CompanyListGenerator;
