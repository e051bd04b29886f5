/// Sector outline read by the enrichment step
pub const MARKET_MATRIX_FILE: &str = "market_matrix.json";

/// Taxonomy written by the enrichment step and read by every later step
pub const ENRICHED_MARKET_MATRIX_FILE: &str = "enriched_market_matrix.json";

/// Base name of the versioned mapping artifacts
pub const MAPPING_FILE_STEM: &str = "company_ticker_map";

/// Report of taxonomy companies missing from the latest mapping
pub const UNMAPPED_COMPANIES_FILE: &str = "unmapped_companies.json";

/// Provider profiles for every mapped symbol
pub const COMPANY_PROFILES_FILE: &str = "company_profiles.json";

/// Companies requested per subsector
pub const COMPANIES_PER_SUBSECTOR: usize = 9;

/// Subsector requests in flight at once during enrichment
pub const ENRICHMENT_CONCURRENCY: usize = 5;

/// Companies sent per LLM ticker lookup request
pub const DEFAULT_LLM_BATCH_SIZE: usize = 20;

/// Metadata `source` values for mapping artifacts
pub const SOURCE_FINNHUB: &str = "finnhub";
pub const SOURCE_YAHOO: &str = "yahoo";
pub const SOURCE_PERPLEXITY: &str = "perplexity_ai";
pub const SOURCE_DUPLICATE_CLEANUP: &str = "duplicate_cleanup";
