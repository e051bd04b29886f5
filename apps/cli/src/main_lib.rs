use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tickermap_core::constants::{ENRICHED_MARKET_MATRIX_FILE, UNMAPPED_COMPANIES_FILE};
use tickermap_core::mappings::MappingStore;
use tickermap_core::resolution::ResolutionService;
use tickermap_core::taxonomies::JsonTaxonomyRepository;

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded through the subscriber's log bridge.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// Repositories over one data directory.
pub struct DataDir {
    pub root: PathBuf,
    pub taxonomy: Arc<JsonTaxonomyRepository>,
    pub mappings: Arc<MappingStore>,
}

impl DataDir {
    pub fn open(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            taxonomy: Arc::new(JsonTaxonomyRepository::new(root)),
            mappings: Arc::new(
                MappingStore::new(root).with_taxonomy(root.join(ENRICHED_MARKET_MATRIX_FILE)),
            ),
        }
    }

    pub fn resolution_service(&self) -> ResolutionService {
        ResolutionService::new(
            self.taxonomy.clone(),
            self.mappings.clone(),
            self.root.join(UNMAPPED_COMPANIES_FILE),
        )
    }
}
