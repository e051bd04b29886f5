//! Resolution module - turning taxonomy company names into ticker mappings.
//!
//! [`BatchOrchestrator`] walks a list of names through a
//! [`tickermap_market_data::NameResolver`]; [`ResolutionService`] wires it to
//! the taxonomy, the mapping artifacts and the unmapped report.

mod orchestrator;
mod progress;
mod resolution_model;
mod resolution_service;
mod resolution_traits;
mod unmapped;

pub use orchestrator::{merge_mappings, BatchOrchestrator};
pub use progress::{LogProgressReporter, NoOpProgressReporter, ResolutionProgressReporter};
pub use resolution_model::{count_mapped, ResolutionOutcome, ResolutionRun, TickerLookupResult};
pub use resolution_service::ResolutionService;
pub use resolution_traits::BatchTickerLookup;
pub use unmapped::{
    find_unmapped, parse_market_cap, UnmappedCompany, UnmappedMetadata, UnmappedReport,
};
