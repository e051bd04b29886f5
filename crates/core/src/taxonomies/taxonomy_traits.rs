//! Traits for taxonomy persistence.

use std::path::{Path, PathBuf};

use crate::Result;

use super::{SectorOutline, Taxonomy};

/// Repository trait for the outline and enriched taxonomy files.
pub trait TaxonomyRepositoryTrait: Send + Sync {
    /// Location of the enriched taxonomy.
    fn taxonomy_path(&self) -> &Path;

    fn load_outline(&self) -> Result<SectorOutline>;
    fn load_taxonomy(&self) -> Result<Taxonomy>;

    /// Write the enriched taxonomy, replacing any previous one.
    fn save_taxonomy(&self, taxonomy: &Taxonomy) -> Result<PathBuf>;
}
