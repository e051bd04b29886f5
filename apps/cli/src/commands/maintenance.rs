use std::sync::Arc;

use tracing::{error, info, warn};

use tickermap_core::constants::COMPANY_PROFILES_FILE;
use tickermap_core::mappings::{unique_tickers, DuplicateService, MappingRepositoryTrait};
use tickermap_core::profiles::ProfileService;
use tickermap_market_data::{FinnhubProvider, RateLimitedClient};

use crate::config::{Config, FINNHUB_API_KEY};
use crate::main_lib::DataDir;

pub fn run_unmapped(data: &DataDir) -> anyhow::Result<()> {
    let report = data.resolution_service().write_unmapped_report()?;
    info!(
        "{} of {} companies have no mapping",
        report.metadata.unmapped_companies, report.metadata.total_companies
    );
    Ok(())
}

pub fn run_dedupe(data: &DataDir) -> anyhow::Result<()> {
    let service = DuplicateService::new(data.mappings.clone());
    if let Some(cleanup) = service.clean_duplicates()? {
        for (symbol, companies) in &cleanup.duplicates {
            warn!("{} is used by: {}", symbol, companies.join(", "));
        }
        info!(
            "Annotated {} duplicate tickers from {} into {}",
            cleanup.duplicates.len(),
            cleanup.original_file.display(),
            cleanup.output_file.display()
        );
    }
    Ok(())
}

/// Log the number of distinct symbols in the latest artifact.
pub fn run_stats(data: &DataDir) -> anyhow::Result<usize> {
    let Some(latest) = data.mappings.load_latest() else {
        error!("No mapping file found");
        return Ok(0);
    };

    let unique = unique_tickers(latest.mappings()).len();
    info!(
        "Found {} unique ticker symbols in {}",
        unique,
        latest.file_name()
    );
    info!("Total mappings: {}", latest.mappings().len());
    Ok(unique)
}

pub async fn run_profiles(config: &Config, data: &DataDir) -> anyhow::Result<()> {
    let api_key = Config::require(&config.finnhub_api_key, FINNHUB_API_KEY)?;
    let provider = Arc::new(RateLimitedClient::new(FinnhubProvider::new(api_key)));

    let service = ProfileService::new(
        provider,
        data.mappings.clone(),
        data.root.join(COMPANY_PROFILES_FILE),
    );
    if let Some(cache) = service.fetch_all().await? {
        info!(
            "Saved {} profiles for {} symbols",
            cache.metadata.profiles_found, cache.metadata.total_symbols
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_stats_counts_unique_symbols() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("company_ticker_map.json"),
            r#"{
              "metadata": {"total_companies": 4, "mapped_companies": 3},
              "mappings": {
                "Alphabet Inc.": "GOOGL",
                "Google": {"sym": "GOOGL", "notes": null},
                "Meta": "META",
                "OpenAI": null
              }
            }"#,
        )
        .unwrap();

        let data = DataDir::open(dir.path());
        assert_eq!(run_stats(&data).unwrap(), 2);
    }

    #[test]
    fn test_stats_without_artifact() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run_stats(&DataDir::open(dir.path())).unwrap(), 0);
    }
}
