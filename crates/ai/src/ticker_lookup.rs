//! Batch ticker lookup through Perplexity's online models.

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::openai};

use tickermap_core::resolution::{BatchTickerLookup, TickerLookupResult, UnmappedCompany};
use tickermap_core::Result;

use crate::error::AiError;
use crate::parsing::{clean_company_name, parse_lookup_reply, NameMap};
use crate::prompts::{ticker_lookup_prompt, TICKER_LOOKUP_PREAMBLE};
use crate::providers::{create_perplexity_client, DEFAULT_PERPLEXITY_MODEL};

/// [`BatchTickerLookup`] asking a Perplexity model for a JSON array of
/// `{name, sym, notes}`.
///
/// Names are cleaned before prompting and mapped back to the names given,
/// so results line up with the unmapped report. A reply that does not parse
/// gives an empty result; only a failed request is an `Err`.
pub struct PerplexityTickerLookup {
    client: openai::CompletionsClient<HttpClient>,
    model: String,
}

impl PerplexityTickerLookup {
    pub fn new(api_key: Option<String>) -> std::result::Result<Self, AiError> {
        Ok(Self {
            client: create_perplexity_client(api_key)?,
            model: DEFAULT_PERPLEXITY_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BatchTickerLookup for PerplexityTickerLookup {
    async fn lookup_batch(&self, companies: &[UnmappedCompany]) -> Result<Vec<TickerLookupResult>> {
        if companies.is_empty() {
            return Ok(Vec::new());
        }

        let names = NameMap::new(companies.iter().map(|c| c.name.as_str()));
        let cleaned: Vec<(String, &str)> = companies
            .iter()
            .map(|c| (clean_company_name(&c.name), c.market_cap.as_str()))
            .collect();
        let prompt = ticker_lookup_prompt(cleaned.iter().map(|(name, cap)| (name.as_str(), *cap)));

        let agent = self
            .client
            .agent(&self.model)
            .preamble(TICKER_LOOKUP_PREAMBLE)
            .build();

        let reply = agent
            .prompt(&prompt)
            .await
            .map_err(|e| AiError::Provider(format!("Error getting tickers from Perplexity: {}", e)))?;
        debug!("Perplexity reply: {}", reply);

        Ok(parse_lookup_reply(&reply, &names))
    }
}
