//! Subsector company lists from an OpenAI chat model.

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::openai};

use tickermap_core::constants::COMPANIES_PER_SUBSECTOR;
use tickermap_core::enrichment::CompanyListGenerator;
use tickermap_core::taxonomies::Company;
use tickermap_core::Result;

use crate::error::AiError;
use crate::parsing::parse_companies_reply;
use crate::prompts::{companies_prompt, companies_response_format, COMPANY_GENERATOR_PREAMBLE};
use crate::providers::{create_openai_client, DEFAULT_OPENAI_MODEL};

/// [`CompanyListGenerator`] backed by structured output of an OpenAI model.
///
/// The request carries a JSON schema that pins the list to
/// [`COMPANIES_PER_SUBSECTOR`] entries; the enrichment service still checks
/// the count.
pub struct OpenAiCompanyGenerator {
    client: openai::CompletionsClient<HttpClient>,
    model: String,
}

impl OpenAiCompanyGenerator {
    pub fn new(api_key: Option<String>) -> std::result::Result<Self, AiError> {
        Ok(Self {
            client: create_openai_client(api_key)?,
            model: DEFAULT_OPENAI_MODEL.to_string(),
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
impl CompanyListGenerator for OpenAiCompanyGenerator {
    async fn top_companies(&self, sector: &str, subsector: &str) -> Result<Vec<Company>> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(COMPANY_GENERATOR_PREAMBLE)
            .additional_params(companies_response_format(COMPANIES_PER_SUBSECTOR))
            .build();

        let reply = agent
            .prompt(&companies_prompt(sector, subsector))
            .await
            .map_err(|e| AiError::Provider(e.to_string()))?;
        debug!("Reply for {} - {}: {}", sector, subsector, reply);

        Ok(parse_companies_reply(&reply)?)
    }
}
