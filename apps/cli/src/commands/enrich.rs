use std::sync::Arc;

use tracing::info;

use tickermap_ai::OpenAiCompanyGenerator;
use tickermap_core::enrichment::EnrichmentService;

use crate::config::{Config, OPENAI_API_KEY};
use crate::main_lib::DataDir;

/// Fill the sector outline with the top companies of every subsector.
pub async fn run_enrich(config: &Config, data: &DataDir) -> anyhow::Result<()> {
    let api_key = Config::require(&config.openai_api_key, OPENAI_API_KEY)?;

    let mut generator = OpenAiCompanyGenerator::new(Some(api_key))?;
    if let Some(model) = &config.openai_model {
        generator = generator.with_model(model);
    }
    info!("Generating company lists with {}", generator.model());

    let service = EnrichmentService::new(Arc::new(generator), data.taxonomy.clone());
    let (taxonomy, path) = service.run().await?;

    info!(
        "Wrote {} companies in {} sectors to {}",
        taxonomy.total_companies(),
        taxonomy.sectors.len(),
        path.display()
    );
    Ok(())
}
