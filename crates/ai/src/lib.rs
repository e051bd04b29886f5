//! Tickermap AI - LLM-backed pipeline steps using rig-core.
//!
//! # Architecture
//!
//! - `company_generator`: [`OpenAiCompanyGenerator`], subsector company
//!   lists via JSON-schema structured output
//! - `ticker_lookup`: [`PerplexityTickerLookup`], batch ticker lookup for
//!   the unmapped report
//! - `providers`: rig-core client factories and default models
//! - `prompts`: prompt texts
//! - `parsing`: reply cleanup (fenced JSON, company names)
//!
//! Both services implement traits from `tickermap-core`, so the core
//! pipeline never sees rig-core types.

pub mod company_generator;
pub mod error;
pub mod parsing;
pub mod prompts;
pub mod providers;
pub mod ticker_lookup;

pub use company_generator::OpenAiCompanyGenerator;
pub use error::AiError;
pub use parsing::{clean_company_name, clean_json_response};
pub use providers::{DEFAULT_OPENAI_MODEL, DEFAULT_PERPLEXITY_MODEL, PERPLEXITY_BASE_URL};
pub use ticker_lookup::PerplexityTickerLookup;
