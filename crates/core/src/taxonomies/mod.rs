//! Taxonomies module - sector outline and enriched taxonomy models.
//!
//! The outline lists sectors and subsector names; the enriched taxonomy adds
//! the top companies of every subsector.

mod taxonomy_model;
mod taxonomy_repository;
mod taxonomy_traits;

pub use taxonomy_model::{Company, OutlineSector, Sector, SectorOutline, Subsector, Taxonomy};
pub use taxonomy_repository::JsonTaxonomyRepository;
pub use taxonomy_traits::TaxonomyRepositoryTrait;
