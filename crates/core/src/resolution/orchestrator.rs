//! Sequential, rate-limited batch resolution.

use std::collections::HashSet;
use std::sync::Arc;

use log::{error, info, warn};

use tickermap_market_data::NameResolver;

use crate::mappings::{Mapping, MappingValue};

use super::progress::ResolutionProgressReporter;
use super::ResolutionOutcome;

/// Key union of two mappings; entries of `new` win.
pub fn merge_mappings(existing: &Mapping, new: &Mapping) -> Mapping {
    let mut merged = existing.clone();
    merged.extend(new.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Resolves company names one at a time.
///
/// Throttling is the resolver's business (wrap its provider in a
/// `RateLimitedClient`); the orchestrator only decides which names to try
/// and keeps going past failures.
///
/// # Example
///
/// ```ignore
/// let provider = RateLimitedClient::new(FinnhubProvider::new(api_key));
/// let resolver = Arc::new(SearchSymbolResolver::new(provider));
/// let orchestrator = BatchOrchestrator::new(resolver, Arc::new(LogProgressReporter));
/// let outcome = orchestrator.run(&taxonomy.company_names(), &existing).await;
/// ```
pub struct BatchOrchestrator {
    resolver: Arc<dyn NameResolver>,
    progress_reporter: Arc<dyn ResolutionProgressReporter>,
}

impl BatchOrchestrator {
    pub fn new(
        resolver: Arc<dyn NameResolver>,
        progress_reporter: Arc<dyn ResolutionProgressReporter>,
    ) -> Self {
        Self {
            resolver,
            progress_reporter,
        }
    }

    /// Resolve every name that is not a key of `already_mapped` and has not
    /// been tried earlier in this run. Never fails; lookup errors are logged
    /// and counted.
    pub async fn run(&self, all_names: &[String], already_mapped: &Mapping) -> ResolutionOutcome {
        let total = all_names.len();
        let mut outcome = ResolutionOutcome::default();
        let mut attempted: HashSet<&str> = HashSet::new();

        self.progress_reporter.report_start(total);

        for (index, name) in all_names.iter().enumerate() {
            if already_mapped.contains_key(name) || !attempted.insert(name.as_str()) {
                outcome.skipped += 1;
                continue;
            }

            self.progress_reporter.report_progress(index + 1, total, name);
            outcome.attempted += 1;

            match self.resolver.resolve(name).await {
                Ok(Some(resolved)) => {
                    info!(
                        "Found ticker for {}: {} ({})",
                        name, resolved.symbol, resolved.tier
                    );
                    outcome
                        .mappings
                        .insert(name.clone(), Some(MappingValue::Symbol(resolved.symbol)));
                    outcome.resolved += 1;
                }
                Ok(None) => {
                    warn!("No ticker found for {}", name);
                    outcome.unresolved += 1;
                }
                Err(e) => {
                    error!("Error looking up symbol for {}: {}", name, e);
                    outcome.failed += 1;
                }
            }
        }

        self.progress_reporter.report_complete(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tickermap_market_data::{MarketDataError, MatchTier, ResolvedSymbol};

    use crate::resolution::NoOpProgressReporter;

    /// Resolver answering from a fixed table; names starting with "!" fail.
    struct TableResolver {
        table: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl TableResolver {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NameResolver for TableResolver {
        async fn resolve(
            &self,
            company_name: &str,
        ) -> Result<Option<ResolvedSymbol>, MarketDataError> {
            self.calls.lock().unwrap().push(company_name.to_string());
            if company_name.starts_with('!') {
                return Err(MarketDataError::RateLimited {
                    provider: "TABLE".to_string(),
                });
            }
            Ok(self.table.get(company_name).map(|symbol| ResolvedSymbol {
                symbol: symbol.clone(),
                tier: MatchTier::Exact,
                search_term: company_name.to_lowercase(),
            }))
        }
    }

    /// Reporter recording every progress position.
    #[derive(Default)]
    struct RecordingReporter {
        positions: Mutex<Vec<(usize, usize)>>,
    }

    impl ResolutionProgressReporter for RecordingReporter {
        fn report_start(&self, _total: usize) {}

        fn report_progress(&self, position: usize, total: usize, _company_name: &str) {
            self.positions.lock().unwrap().push((position, total));
        }

        fn report_complete(&self, _outcome: &ResolutionOutcome) {}
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_skips_already_mapped_and_repeats() {
        let resolver = Arc::new(TableResolver::new(&[("X", "XXX"), ("Y", "YYY")]));
        let orchestrator = BatchOrchestrator::new(resolver.clone(), Arc::new(NoOpProgressReporter));

        let mut existing = Mapping::new();
        existing.insert("X".to_string(), Some(MappingValue::from("XXX")));

        let outcome = orchestrator.run(&names(&["X", "Y", "Y"]), &existing).await;

        assert_eq!(resolver.calls(), vec!["Y".to_string()]);
        assert_eq!(outcome.mappings.len(), 1);
        assert_eq!(outcome.mappings["Y"], Some(MappingValue::from("YYY")));
        assert_eq!(outcome.attempted, 1);
        assert_eq!(outcome.skipped, 2);
    }

    #[tokio::test]
    async fn test_null_valued_key_counts_as_processed() {
        let resolver = Arc::new(TableResolver::new(&[("OpenAI", "OAI")]));
        let orchestrator = BatchOrchestrator::new(resolver.clone(), Arc::new(NoOpProgressReporter));

        let mut existing = Mapping::new();
        existing.insert("OpenAI".to_string(), None);

        let outcome = orchestrator.run(&names(&["OpenAI"]), &existing).await;
        assert!(resolver.calls().is_empty());
        assert!(outcome.mappings.is_empty());
    }

    #[tokio::test]
    async fn test_failures_and_misses_do_not_stop_the_batch() {
        let resolver = Arc::new(TableResolver::new(&[("A", "AAA"), ("C", "CCC")]));
        let orchestrator = BatchOrchestrator::new(resolver, Arc::new(NoOpProgressReporter));

        let outcome = orchestrator
            .run(&names(&["A", "!boom", "B", "C"]), &Mapping::new())
            .await;

        assert_eq!(outcome.attempted, 4);
        assert_eq!(outcome.resolved, 2);
        assert_eq!(outcome.unresolved, 1);
        assert_eq!(outcome.failed, 1);
        assert!(outcome.mappings.contains_key("C"));
        assert!(!outcome.mappings.contains_key("B"));
    }

    #[tokio::test]
    async fn test_rerun_with_merged_mapping_adds_nothing() {
        let resolver = Arc::new(TableResolver::new(&[("X", "XXX"), ("Y", "YYY")]));
        let orchestrator = BatchOrchestrator::new(resolver.clone(), Arc::new(NoOpProgressReporter));
        let all = names(&["X", "Y"]);

        let first = orchestrator.run(&all, &Mapping::new()).await;
        let merged = merge_mappings(&Mapping::new(), &first.mappings);
        let second = orchestrator.run(&all, &merged).await;

        assert_eq!(first.mappings.len(), 2);
        assert!(second.mappings.is_empty());
        assert_eq!(resolver.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_rerun_retries_only_previous_misses() {
        let resolver = Arc::new(TableResolver::new(&[("X", "XXX")]));
        let orchestrator = BatchOrchestrator::new(resolver.clone(), Arc::new(NoOpProgressReporter));
        let all = names(&["X", "Y"]);

        let first = orchestrator.run(&all, &Mapping::new()).await;
        assert_eq!(first.resolved, 1);
        assert_eq!(first.unresolved, 1);

        let merged = merge_mappings(&Mapping::new(), &first.mappings);
        assert!(!merged.contains_key("Y"));

        let second = orchestrator.run(&all, &merged).await;
        assert_eq!(second.attempted, 1);
        assert_eq!(second.skipped, 1);
        assert_eq!(resolver.calls(), vec!["X", "Y", "Y"]);
    }

    #[tokio::test]
    async fn test_progress_positions_cover_all_names() {
        let resolver = Arc::new(TableResolver::new(&[]));
        let reporter = Arc::new(RecordingReporter::default());
        let orchestrator = BatchOrchestrator::new(resolver, reporter.clone());

        let mut existing = Mapping::new();
        existing.insert("A".to_string(), None);
        orchestrator
            .run(&names(&["A", "B", "C"]), &existing)
            .await;

        assert_eq!(*reporter.positions.lock().unwrap(), vec![(2, 3), (3, 3)]);
    }

    #[test]
    fn test_merge_new_wins() {
        let mut existing = Mapping::new();
        existing.insert("A".to_string(), Some(MappingValue::from("OLD")));
        existing.insert("B".to_string(), None);
        let mut new = Mapping::new();
        new.insert("A".to_string(), Some(MappingValue::from("NEW")));
        new.insert("C".to_string(), Some(MappingValue::from("CCC")));

        let merged = merge_mappings(&existing, &new);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["A"], Some(MappingValue::from("NEW")));
        assert_eq!(merged["B"], None);
    }
}
