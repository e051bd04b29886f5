//! Traits for mapping artifact persistence.

use std::path::PathBuf;

use crate::Result;

use super::{LoadedArtifact, Mapping, MappingMetadata};

/// Repository trait for versioned mapping artifacts.
pub trait MappingRepositoryTrait: Send + Sync {
    /// The most recent artifact, or `None` when there is none or it cannot
    /// be read. Read failures are logged, never returned.
    fn load_latest(&self) -> Option<LoadedArtifact>;

    /// Write `mappings` as a new artifact under the next free file name and
    /// return its path. Existing artifacts are never overwritten.
    fn save_next(&self, mappings: &Mapping, metadata: MappingMetadata) -> Result<PathBuf>;
}
