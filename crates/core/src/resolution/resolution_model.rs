//! Resolution result models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mappings::{Mapping, MappingValue};

/// What a batch resolution produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionOutcome {
    /// Newly found mappings only
    pub mappings: Mapping,
    /// Names sent to the resolver
    pub attempted: usize,
    /// Names that got a symbol
    pub resolved: usize,
    /// Names searched without a qualifying candidate
    pub unresolved: usize,
    /// Names whose lookup failed
    pub failed: usize,
    /// Names skipped as already mapped or already attempted
    pub skipped: usize,
}

/// A resolution flow's outcome and the artifact it wrote, if any.
#[derive(Debug, Clone)]
pub struct ResolutionRun {
    pub outcome: ResolutionOutcome,
    pub output_file: Option<PathBuf>,
}

/// One company returned by a batch ticker lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerLookupResult {
    pub name: String,
    #[serde(default)]
    pub sym: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Entries that carry a symbol.
pub fn count_mapped(mapping: &Mapping) -> usize {
    mapping
        .values()
        .filter(|value| value.as_ref().and_then(MappingValue::symbol).is_some())
        .count()
}
