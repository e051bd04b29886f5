//! Opt-in cleanup that annotates duplicate tickers in a new artifact.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};

use crate::constants::SOURCE_DUPLICATE_CLEANUP;
use crate::Result;

use super::{
    annotate_duplicates, find_duplicate_tickers, unique_tickers, MappingMetadata,
    MappingRepositoryTrait,
};

/// Result of a cleanup that found duplicates.
#[derive(Debug, Clone)]
pub struct DuplicateCleanup {
    /// The artifact that was read
    pub original_file: PathBuf,
    /// The annotated artifact that was written
    pub output_file: PathBuf,
    /// Symbol to the companies sharing it
    pub duplicates: BTreeMap<String, Vec<String>>,
}

pub struct DuplicateService {
    mapping_repository: Arc<dyn MappingRepositoryTrait>,
}

impl DuplicateService {
    pub fn new(mapping_repository: Arc<dyn MappingRepositoryTrait>) -> Self {
        Self { mapping_repository }
    }

    /// Annotate the latest artifact's duplicate tickers into a new artifact.
    ///
    /// Returns `None` without writing when there is no artifact or no
    /// symbol is shared.
    pub fn clean_duplicates(&self) -> Result<Option<DuplicateCleanup>> {
        let Some(latest) = self.mapping_repository.load_latest() else {
            error!("No mapping file found");
            return Ok(None);
        };

        let mappings = latest.mappings();
        let duplicates = find_duplicate_tickers(mappings);
        if duplicates.is_empty() {
            info!("No duplicate ticker mappings found in {}", latest.file_name());
            return Ok(None);
        }

        info!("Found {} tickers with multiple companies:", duplicates.len());
        for (symbol, companies) in &duplicates {
            info!("Ticker {} is used by: {}", symbol, companies.join(", "));
        }

        let annotated = annotate_duplicates(mappings, &duplicates);
        let unique = unique_tickers(mappings).len();
        let metadata = MappingMetadata {
            source: Some(SOURCE_DUPLICATE_CLEANUP.to_string()),
            original_file: Some(latest.file_name()),
            mapped_companies: unique,
            ..Default::default()
        };

        let output_file = self.mapping_repository.save_next(&annotated, metadata)?;
        info!(
            "Created {}: {} mappings, {} unique tickers, {} duplicated",
            output_file.display(),
            annotated.len(),
            unique,
            duplicates.len()
        );

        Ok(Some(DuplicateCleanup {
            original_file: latest.path,
            output_file,
            duplicates,
        }))
    }
}
