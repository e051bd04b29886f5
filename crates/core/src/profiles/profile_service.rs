//! Fetches provider profiles for the symbols of the latest mapping.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};

use tickermap_market_data::{format_market_cap, MarketDataError, MarketDataProvider};

use crate::mappings::{unique_tickers, MappingRepositoryTrait};
use crate::utils::json_file::save_json;
use crate::Result;

use super::{ProfileCache, ProfileCacheMetadata};

pub struct ProfileService {
    provider: Arc<dyn MarketDataProvider>,
    mapping_repository: Arc<dyn MappingRepositoryTrait>,
    output_path: PathBuf,
}

impl ProfileService {
    /// `provider` should already be rate limited.
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        mapping_repository: Arc<dyn MappingRepositoryTrait>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            mapping_repository,
            output_path: output_path.into(),
        }
    }

    /// Fetch a profile for every distinct symbol of the latest artifact and
    /// write the cache file. Returns `None` when there is no artifact.
    /// Missing profiles and lookup errors are logged and skipped.
    pub async fn fetch_all(&self) -> Result<Option<ProfileCache>> {
        let Some(latest) = self.mapping_repository.load_latest() else {
            error!("No mapping file found");
            return Ok(None);
        };

        let symbols = unique_tickers(latest.mappings());
        let total = symbols.len();
        info!("Found {} unique symbols to process", total);

        let mut profiles = BTreeMap::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            info!("Processing {} ({}/{})", symbol, index + 1, total);
            match self.provider.get_profile(&symbol).await {
                Ok(profile) => {
                    let market_cap = profile
                        .market_capitalization
                        .map(format_market_cap)
                        .unwrap_or_else(|| "N/A".to_string());
                    info!(
                        "Found profile for {}: {} ({})",
                        symbol,
                        profile.name.as_deref().unwrap_or("unnamed"),
                        market_cap
                    );
                    profiles.insert(symbol, profile);
                }
                Err(MarketDataError::SymbolNotFound(_)) => {
                    warn!("No profile found for {}", symbol);
                }
                Err(e) => {
                    error!("Error getting profile for {}: {}", symbol, e);
                }
            }
        }

        let cache = ProfileCache {
            metadata: ProfileCacheMetadata {
                total_symbols: total,
                profiles_found: profiles.len(),
                source_file: latest.file_name(),
            },
            profiles,
        };
        save_json(&self.output_path, &cache)?;
        info!(
            "Saved {} profiles to {}",
            cache.metadata.profiles_found,
            self.output_path.display()
        );

        Ok(Some(cache))
    }
}
