use std::sync::Arc;

use clap::ValueEnum;
use tracing::info;

use tickermap_ai::PerplexityTickerLookup;
use tickermap_core::constants::{SOURCE_FINNHUB, SOURCE_YAHOO};
use tickermap_core::resolution::{BatchOrchestrator, LogProgressReporter, ResolutionRun};
use tickermap_market_data::{
    FinnhubProvider, NameNormalizer, NameResolver, RateLimitedClient, SearchSymbolResolver,
    YahooProvider, KNOWN_TICKERS,
};

use crate::config::{Config, FINNHUB_API_KEY, PPL_API_KEY};
use crate::main_lib::DataDir;

/// Search backend for symbol resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchProvider {
    Finnhub,
    Yahoo,
}

impl SearchProvider {
    fn source(self) -> &'static str {
        match self {
            SearchProvider::Finnhub => SOURCE_FINNHUB,
            SearchProvider::Yahoo => SOURCE_YAHOO,
        }
    }
}

/// Rate-limited resolver for `provider`. The Yahoo flavour consults the
/// known-ticker table before searching.
fn build_resolver(
    provider: SearchProvider,
    config: &Config,
) -> anyhow::Result<Arc<dyn NameResolver>> {
    let resolver: Arc<dyn NameResolver> = match provider {
        SearchProvider::Finnhub => {
            let api_key = Config::require(&config.finnhub_api_key, FINNHUB_API_KEY)?;
            Arc::new(SearchSymbolResolver::new(RateLimitedClient::new(
                FinnhubProvider::new(api_key),
            )))
        }
        SearchProvider::Yahoo => {
            let normalizer = NameNormalizer::default().with_known_tickers(KNOWN_TICKERS.iter().copied());
            Arc::new(SearchSymbolResolver::with_normalizer(
                RateLimitedClient::new(YahooProvider::new()?),
                normalizer,
            ))
        }
    };
    Ok(resolver)
}

fn report(run: &ResolutionRun) {
    let outcome = &run.outcome;
    info!(
        "Resolved {}, unresolved {}, failed {}, skipped {}",
        outcome.resolved, outcome.unresolved, outcome.failed, outcome.skipped
    );
    match &run.output_file {
        Some(path) => info!("Mappings saved to {}", path.display()),
        None => info!("No new mapping file written"),
    }
}

/// Resolve taxonomy companies (or only the unmapped report) through a
/// search provider.
pub async fn run_resolve(
    config: &Config,
    data: &DataDir,
    provider: SearchProvider,
    unmapped_only: bool,
) -> anyhow::Result<()> {
    let resolver = build_resolver(provider, config)?;
    let orchestrator = BatchOrchestrator::new(resolver, Arc::new(LogProgressReporter));
    let service = data.resolution_service();

    let run = if unmapped_only {
        service.resolve_unmapped(&orchestrator, provider.source()).await?
    } else {
        service.resolve_taxonomy(&orchestrator, provider.source()).await?
    };
    report(&run);
    Ok(())
}

/// Ask the LLM for the tickers of the unmapped report in batches.
pub async fn run_llm_resolve(
    config: &Config,
    data: &DataDir,
    batch_size: usize,
) -> anyhow::Result<()> {
    let api_key = Config::require(&config.perplexity_api_key, PPL_API_KEY)?;

    let mut lookup = PerplexityTickerLookup::new(Some(api_key))?;
    if let Some(model) = &config.perplexity_model {
        lookup = lookup.with_model(model);
    }
    info!("Looking up unmapped tickers with {}", lookup.model());

    let run = data
        .resolution_service()
        .resolve_unmapped_with_llm(&lookup, batch_size)
        .await?;
    report(&run);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finnhub_requires_key() {
        let config = Config::from_lookup(|_| None);
        let err = build_resolver(SearchProvider::Finnhub, &config).err().unwrap();
        assert!(err.to_string().contains("FINNHUB_API_KEY"));
    }

    #[test]
    fn test_sources() {
        assert_eq!(SearchProvider::Finnhub.source(), "finnhub");
        assert_eq!(SearchProvider::Yahoo.source(), "yahoo");
    }
}
