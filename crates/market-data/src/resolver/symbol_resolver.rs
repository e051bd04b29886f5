//! Tiered ticker selection over provider search results.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::SearchResult;
use crate::provider::MarketDataProvider;

use super::normalizer::NameNormalizer;
use super::traits::{MatchTier, NameResolver, ResolvedSymbol};

/// Share of query tokens that must appear in a description for a partial
/// match.
const PARTIAL_OVERLAP_THRESHOLD: f64 = 0.5;

/// Resolves names by searching a provider and ranking the candidates.
///
/// Wrap the provider in a [`crate::rate_limit::RateLimitedClient`] to
/// throttle the searches.
pub struct SearchSymbolResolver<P> {
    provider: P,
    normalizer: NameNormalizer,
}

impl<P: MarketDataProvider> SearchSymbolResolver<P> {
    pub fn new(provider: P) -> Self {
        Self::with_normalizer(provider, NameNormalizer::default())
    }

    pub fn with_normalizer(provider: P, normalizer: NameNormalizer) -> Self {
        Self {
            provider,
            normalizer,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }
}

#[async_trait]
impl<P: MarketDataProvider> NameResolver for SearchSymbolResolver<P> {
    async fn resolve(&self, company_name: &str) -> Result<Option<ResolvedSymbol>, MarketDataError> {
        let search_term = self.normalizer.search_term(company_name);

        if let Some(ticker) = self.normalizer.known_ticker(company_name) {
            return Ok(Some(ResolvedSymbol {
                symbol: ticker.to_string(),
                tier: MatchTier::Known,
                search_term,
            }));
        }

        if search_term.is_empty() {
            debug!("Nothing to search for '{}'", company_name);
            return Ok(None);
        }

        let results = self.provider.search(&search_term).await?;
        let original = company_name.to_lowercase();

        let resolved = select_candidate(&results, &search_term, &original).map(|(result, tier)| {
            debug!(
                "{} -> {} ({} match on '{}')",
                company_name, result.symbol, tier, search_term
            );
            ResolvedSymbol {
                symbol: result.symbol.clone(),
                tier,
                search_term,
            }
        });

        Ok(resolved)
    }
}

/// Pick the first candidate of the best tier that has one.
fn select_candidate<'a>(
    results: &'a [SearchResult],
    search_term: &str,
    original_name: &str,
) -> Option<(&'a SearchResult, MatchTier)> {
    let exact = results.iter().find(|r| {
        let description = r.description.to_lowercase();
        r.is_domestic_equity()
            && (description.contains(search_term) || description.contains(original_name))
    });
    if let Some(result) = exact {
        return Some((result, MatchTier::Exact));
    }

    let partial = results.iter().find(|r| {
        r.is_domestic_equity() && token_overlap(search_term, &r.description) > PARTIAL_OVERLAP_THRESHOLD
    });
    if let Some(result) = partial {
        return Some((result, MatchTier::Partial));
    }

    results
        .iter()
        .find(|r| r.security_type.is_common_equity())
        .map(|result| (result, MatchTier::Fallback))
}

/// `|query ∩ description| / |query|` over lowercased whitespace tokens.
fn token_overlap(query: &str, description: &str) -> f64 {
    let query_tokens: HashSet<String> = query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if query_tokens.is_empty() {
        return 0.0;
    }
    let description_tokens: HashSet<String> = description
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    let shared = query_tokens.intersection(&description_tokens).count();
    shared as f64 / query_tokens.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::models::SecurityType;
    use crate::provider::{ProviderCapabilities, RateLimit};
    use crate::resolver::KNOWN_TICKERS;

    /// Provider returning canned results per query and recording queries.
    #[derive(Default)]
    struct ScriptedProvider {
        results: HashMap<String, Vec<SearchResult>>,
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn with(mut self, query: &str, results: Vec<SearchResult>) -> Self {
            self.results.insert(query.to_string(), results);
            self
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MarketDataProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                supports_search: true,
                supports_profile: false,
            }
        }

        fn rate_limit(&self) -> RateLimit {
            RateLimit::default()
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(MarketDataError::RateLimited {
                    provider: "SCRIPTED".to_string(),
                });
            }
            Ok(self.results.get(query).cloned().unwrap_or_default())
        }
    }

    fn stock(symbol: &str, description: &str) -> SearchResult {
        SearchResult::new(symbol, description, symbol, SecurityType::CommonStock)
    }

    fn etf(symbol: &str, description: &str) -> SearchResult {
        SearchResult::new(symbol, description, symbol, SecurityType::Etf)
    }

    #[tokio::test]
    async fn test_alias_changes_search_term() {
        let provider = ScriptedProvider::default().with(
            "google",
            vec![stock("GOOG.MX", "Alphabet Inc."), stock("GOOGL", "Alphabet Inc.")],
        );
        let resolver = SearchSymbolResolver::new(provider);

        let resolved = resolver.resolve("Alphabet Inc.").await.unwrap().unwrap();
        assert_eq!(resolved.search_term, "google");
        assert_eq!(resolver.provider().queries(), vec!["google".to_string()]);
        // No description contains "google", but both contain the original name.
        assert_eq!(resolved.symbol, "GOOGL");
        assert_eq!(resolved.tier, MatchTier::Exact);
    }

    #[tokio::test]
    async fn test_exact_prefers_domestic_listing() {
        let provider = ScriptedProvider::default().with(
            "abc",
            vec![stock("ABC.L", "abc corp"), stock("ABC", "abc corp")],
        );
        let resolver = SearchSymbolResolver::new(provider);

        let resolved = resolver.resolve("ABC Corp").await.unwrap().unwrap();
        assert_eq!(resolved.symbol, "ABC");
        assert_eq!(resolved.tier, MatchTier::Exact);
    }

    #[tokio::test]
    async fn test_half_overlap_is_not_partial() {
        let provider = ScriptedProvider::default().with(
            "general motors",
            vec![stock("GE", "GENERAL ELECTRIC"), stock("GM.MX", "GENERAL MOTORS CO")],
        );
        let resolver = SearchSymbolResolver::new(provider);

        let resolved = resolver.resolve("General Motors").await.unwrap().unwrap();
        assert_eq!(resolved.symbol, "GE");
        assert_eq!(resolved.tier, MatchTier::Fallback);
    }

    #[tokio::test]
    async fn test_partial_tier() {
        let provider = ScriptedProvider::default().with(
            "united parcel service",
            vec![stock("UPSX", "PARCEL LOGISTICS"), stock("UPS", "UNITED PARCEL SVC INC-CL B")],
        );
        let resolver = SearchSymbolResolver::new(provider);

        let resolved = resolver.resolve("United Parcel Service, Inc.").await.unwrap().unwrap();
        // "svc" breaks the substring match but 2 of 3 tokens remain.
        assert_eq!(resolved.symbol, "UPS");
        assert_eq!(resolved.tier, MatchTier::Partial);
    }

    #[tokio::test]
    async fn test_fallback_accepts_foreign_listing() {
        let provider = ScriptedProvider::default().with(
            "novo nordisk",
            vec![etf("NOVO", "NORDIC FUND"), stock("NOVO-B.CO", "NOVO-NORDISK A/S-B")],
        );
        let resolver = SearchSymbolResolver::new(provider);

        let resolved = resolver.resolve("Novo Nordisk").await.unwrap().unwrap();
        assert_eq!(resolved.symbol, "NOVO-B.CO");
        assert_eq!(resolved.tier, MatchTier::Fallback);
    }

    #[tokio::test]
    async fn test_no_common_equity_is_none() {
        let provider = ScriptedProvider::default()
            .with("vanguard", vec![etf("VOO", "VANGUARD S&P 500 ETF")]);
        let resolver = SearchSymbolResolver::new(provider);

        assert_eq!(resolver.resolve("Vanguard").await.unwrap(), None);
        assert_eq!(resolver.resolve("Unknown Startup").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_search_term_skips_provider() {
        let resolver = SearchSymbolResolver::new(ScriptedProvider::default());

        assert_eq!(resolver.resolve("  ").await.unwrap(), None);
        assert_eq!(resolver.resolve("Inc.").await.unwrap(), None);
        assert!(resolver.provider().queries().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = ScriptedProvider {
            fail: true,
            ..Default::default()
        };
        let resolver = SearchSymbolResolver::new(provider);

        let err = resolver.resolve("Apple Inc.").await.unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_known_ticker_skips_provider() {
        let normalizer = NameNormalizer::new().with_known_tickers(KNOWN_TICKERS.iter().copied());
        let resolver = SearchSymbolResolver::with_normalizer(ScriptedProvider::default(), normalizer);

        let resolved = resolver.resolve("Tesla, Inc.").await.unwrap().unwrap();
        assert_eq!(resolved.symbol, "TSLA");
        assert_eq!(resolved.tier, MatchTier::Known);
        assert!(resolver.provider().queries().is_empty());
    }

    #[test]
    fn test_token_overlap() {
        assert_eq!(token_overlap("united parcel service", "UNITED PARCEL SERVICE-CL B"), 2.0 / 3.0);
        assert_eq!(token_overlap("abc", "xyz"), 0.0);
        assert_eq!(token_overlap("", "xyz"), 0.0);
        assert_eq!(token_overlap("a b", "b a c"), 1.0);
    }
}
