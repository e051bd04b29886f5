//! File-backed mapping store.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, error, info, warn};

use crate::constants::MAPPING_FILE_STEM;
use crate::taxonomies::Taxonomy;
use crate::utils::json_file::{load_json, write_pretty_json};
use crate::Result;

use super::{LoadedArtifact, Mapping, MappingArtifact, MappingMetadata, MappingRepositoryTrait};

/// File name of the `sequence`-th artifact: `company_ticker_map.json` for 1,
/// `company_ticker_map_<n>.json` after that.
pub fn artifact_file_name(sequence: u32) -> String {
    if sequence <= 1 {
        format!("{}.json", MAPPING_FILE_STEM)
    } else {
        format!("{}_{}.json", MAPPING_FILE_STEM, sequence)
    }
}

/// Sequence number encoded in an artifact file name. Files that match the
/// artifact pattern without a numeric suffix (e.g. a hand-made backup) get 0.
/// Returns `None` for names outside the pattern.
pub fn artifact_sequence(file_name: &str) -> Option<u32> {
    let middle = file_name
        .strip_prefix(MAPPING_FILE_STEM)?
        .strip_suffix(".json")?;

    if middle.is_empty() {
        return Some(1);
    }
    Some(
        middle
            .strip_prefix('_')
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(0),
    )
}

/// Mapping artifacts stored as JSON files in one directory.
pub struct MappingStore {
    data_dir: PathBuf,
    taxonomy_path: Option<PathBuf>,
}

impl MappingStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            taxonomy_path: None,
        }
    }

    /// Count `total_companies` from this taxonomy file on every save.
    pub fn with_taxonomy(mut self, taxonomy_path: impl Into<PathBuf>) -> Self {
        self.taxonomy_path = Some(taxonomy_path.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Artifact files in the data directory with their modification time
    /// and sequence number.
    fn artifact_files(&self) -> std::io::Result<Vec<(PathBuf, SystemTime, u32)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(sequence) = artifact_sequence(&file_name.to_string_lossy()) else {
                continue;
            };
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((entry.path(), modified, sequence));
        }
        Ok(files)
    }

    /// Companies in the configured taxonomy, 0 when it cannot be read.
    fn count_taxonomy_companies(&self, path: &Path) -> usize {
        match load_json::<Taxonomy>(path) {
            Ok(taxonomy) => taxonomy.total_companies(),
            Err(e) => {
                warn!("Error reading taxonomy {}: {}", path.display(), e);
                0
            }
        }
    }
}

impl MappingRepositoryTrait for MappingStore {
    fn load_latest(&self) -> Option<LoadedArtifact> {
        let files = match self.artifact_files() {
            Ok(files) => files,
            Err(e) => {
                error!("Error listing {}: {}", self.data_dir.display(), e);
                return None;
            }
        };

        let (path, _, _) = files
            .into_iter()
            .max_by_key(|(_, modified, sequence)| (*modified, *sequence))?;

        match load_json::<MappingArtifact>(&path) {
            Ok(artifact) => {
                debug!(
                    "Loaded {} with {} mappings",
                    path.display(),
                    artifact.mappings.len()
                );
                Some(LoadedArtifact { path, artifact })
            }
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save_next(&self, mappings: &Mapping, mut metadata: MappingMetadata) -> Result<PathBuf> {
        if let Some(taxonomy_path) = &self.taxonomy_path {
            metadata.total_companies = self.count_taxonomy_companies(taxonomy_path);
        }

        let artifact = MappingArtifact {
            metadata,
            mappings: mappings.clone(),
        };

        let mut sequence = 1;
        loop {
            let path = self.data_dir.join(artifact_file_name(sequence));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_pretty_json(file, &artifact)?;
                    info!(
                        "Saved {} mappings to {}",
                        artifact.mappings.len(),
                        path.display()
                    );
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => sequence += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
