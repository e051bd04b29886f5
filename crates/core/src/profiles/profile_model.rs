use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tickermap_market_data::CompanyProfile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCacheMetadata {
    /// Distinct symbols in the source artifact
    pub total_symbols: usize,
    /// Symbols for which a profile was returned
    pub profiles_found: usize,
    /// Mapping artifact the symbols came from
    pub source_file: String,
}

/// Contents of the profile cache file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCache {
    pub metadata: ProfileCacheMetadata,
    pub profiles: BTreeMap<String, CompanyProfile>,
}
