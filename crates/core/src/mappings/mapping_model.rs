//! Mapping artifact models.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The value recorded for a company.
///
/// Early artifacts store the bare symbol; artifacts written by the duplicate
/// cleanup store `{"sym": ..., "notes": ...}`. Both shapes are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingValue {
    Symbol(String),
    Annotated {
        sym: Option<String>,
        notes: Option<String>,
    },
}

impl MappingValue {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            MappingValue::Symbol(symbol) => Some(symbol),
            MappingValue::Annotated { sym, .. } => sym.as_deref(),
        }
    }

    pub fn notes(&self) -> Option<&str> {
        match self {
            MappingValue::Symbol(_) => None,
            MappingValue::Annotated { notes, .. } => notes.as_deref(),
        }
    }
}

impl From<&str> for MappingValue {
    fn from(symbol: &str) -> Self {
        MappingValue::Symbol(symbol.to_string())
    }
}

impl From<String> for MappingValue {
    fn from(symbol: String) -> Self {
        MappingValue::Symbol(symbol)
    }
}

/// Company name to recorded value. A `None` value means the company was
/// processed and no symbol exists.
pub type Mapping = BTreeMap<String, Option<MappingValue>>;

/// Header of a mapping artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default)]
    pub total_companies: usize,

    #[serde(default)]
    pub mapped_companies: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file: Option<String>,

    /// Fields written by other tools, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MappingMetadata {
    /// Metadata stamped with the current time.
    pub fn now(source: impl Into<String>) -> Self {
        Self {
            created_at: Some(
                chrono::Local::now()
                    .naive_local()
                    .format("%Y-%m-%dT%H:%M:%S%.6f")
                    .to_string(),
            ),
            source: Some(source.into()),
            ..Default::default()
        }
    }

    pub fn with_mapped_companies(mut self, count: usize) -> Self {
        self.mapped_companies = count;
        self
    }

    pub fn with_source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    pub fn with_original_file(mut self, file: impl Into<String>) -> Self {
        self.original_file = Some(file.into());
        self
    }
}

/// A complete mapping file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingArtifact {
    pub metadata: MappingMetadata,
    pub mappings: Mapping,
}

/// An artifact together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub path: PathBuf,
    pub artifact: MappingArtifact,
}

impl LoadedArtifact {
    /// File name without directory, as recorded in metadata.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn mappings(&self) -> &Mapping {
        &self.artifact.mappings
    }
}
