//! JSON file storage for the outline and enriched taxonomy.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;

use crate::constants::{ENRICHED_MARKET_MATRIX_FILE, MARKET_MATRIX_FILE};
use crate::errors::Error;
use crate::utils::json_file::save_json;
use crate::Result;

use super::{SectorOutline, Taxonomy, TaxonomyRepositoryTrait};

pub struct JsonTaxonomyRepository {
    outline_path: PathBuf,
    taxonomy_path: PathBuf,
}

impl JsonTaxonomyRepository {
    /// Repository over the default file names inside `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            outline_path: data_dir.join(MARKET_MATRIX_FILE),
            taxonomy_path: data_dir.join(ENRICHED_MARKET_MATRIX_FILE),
        }
    }

    pub fn with_paths(outline_path: impl Into<PathBuf>, taxonomy_path: impl Into<PathBuf>) -> Self {
        Self {
            outline_path: outline_path.into(),
            taxonomy_path: taxonomy_path.into(),
        }
    }
}

fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading {}", path.display());
    let contents = fs::read_to_string(path).map_err(|e| Error::input_file(path, e))?;
    serde_json::from_str(&contents).map_err(|e| Error::input_file(path, e))
}

impl TaxonomyRepositoryTrait for JsonTaxonomyRepository {
    fn taxonomy_path(&self) -> &Path {
        &self.taxonomy_path
    }

    fn load_outline(&self) -> Result<SectorOutline> {
        read_input(&self.outline_path)
    }

    fn load_taxonomy(&self) -> Result<Taxonomy> {
        read_input(&self.taxonomy_path)
    }

    fn save_taxonomy(&self, taxonomy: &Taxonomy) -> Result<PathBuf> {
        save_json(&self.taxonomy_path, taxonomy)?;
        Ok(self.taxonomy_path.clone())
    }
}
