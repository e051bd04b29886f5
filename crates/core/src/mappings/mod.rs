//! Mappings module - versioned company-to-ticker artifacts.
//!
//! Each run writes a new `company_ticker_map[_N].json`; older artifacts are
//! never modified. The newest one is the input of the next run.

mod duplicate_service;
mod duplicates;
mod mapping_model;
mod mapping_store;
mod mapping_traits;

pub use duplicate_service::{DuplicateCleanup, DuplicateService};
pub use duplicates::{annotate_duplicates, find_duplicate_tickers, unique_tickers};
pub use mapping_model::{
    LoadedArtifact, Mapping, MappingArtifact, MappingMetadata, MappingValue,
};
pub use mapping_store::{artifact_file_name, artifact_sequence, MappingStore};
pub use mapping_traits::MappingRepositoryTrait;
