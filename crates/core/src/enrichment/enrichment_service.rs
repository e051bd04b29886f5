//! Bounded-parallel taxonomy enrichment.

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{error, info, warn};

use crate::constants::{COMPANIES_PER_SUBSECTOR, ENRICHMENT_CONCURRENCY};
use crate::taxonomies::{
    Company, Sector, SectorOutline, Subsector, Taxonomy, TaxonomyRepositoryTrait,
};
use crate::Result;

use super::CompanyListGenerator;

/// The list recorded for a subsector whose request failed.
pub fn placeholder_companies(subsector: &str) -> Vec<Company> {
    vec![Company::new(format!("Error processing {}", subsector), "N/A"); COMPANIES_PER_SUBSECTOR]
}

pub struct EnrichmentService {
    generator: Arc<dyn CompanyListGenerator>,
    taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
    concurrency: usize,
}

impl EnrichmentService {
    pub fn new(
        generator: Arc<dyn CompanyListGenerator>,
        taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
    ) -> Self {
        Self {
            generator,
            taxonomy_repository,
            concurrency: ENRICHMENT_CONCURRENCY,
        }
    }

    /// Override the number of requests in flight.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn companies_for(&self, sector: &str, subsector: &str) -> Vec<Company> {
        info!("Processing {} - {}...", sector, subsector);
        match self.generator.top_companies(sector, subsector).await {
            Ok(companies) if companies.len() == COMPANIES_PER_SUBSECTOR => {
                info!("Completed {} - {}", sector, subsector);
                companies
            }
            Ok(companies) => {
                warn!(
                    "Expected {} companies for {} - {}, got {}",
                    COMPANIES_PER_SUBSECTOR,
                    sector,
                    subsector,
                    companies.len()
                );
                placeholder_companies(subsector)
            }
            Err(e) => {
                error!("Error processing {} - {}: {}", sector, subsector, e);
                placeholder_companies(subsector)
            }
        }
    }

    /// Request every subsector of `outline`, at most `concurrency` at a
    /// time, and assemble the results in outline order. Never fails; failed
    /// subsectors get [`placeholder_companies`].
    pub async fn enrich(&self, outline: &SectorOutline) -> Taxonomy {
        let pairs = outline.subsector_pairs();
        info!(
            "Processing {} subsectors, {} at a time",
            pairs.len(),
            self.concurrency
        );

        let mut results: Vec<(usize, Vec<Company>)> = stream::iter(pairs.iter().enumerate())
            .map(|(index, (sector, subsector))| async move {
                (index, self.companies_for(sector, subsector).await)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);

        let mut companies = results.into_iter().map(|(_, companies)| companies);
        let sectors = outline
            .sectors
            .iter()
            .map(|sector| Sector {
                name: sector.name.clone(),
                subsectors: sector
                    .subsectors
                    .iter()
                    .map(|subsector| Subsector {
                        name: subsector.clone(),
                        companies: companies.next().unwrap_or_default(),
                    })
                    .collect(),
                extra: sector.extra.clone(),
            })
            .collect();

        Taxonomy { sectors }
    }

    /// Load the outline, enrich it and write the taxonomy once every
    /// request has finished.
    pub async fn run(&self) -> Result<(Taxonomy, PathBuf)> {
        let outline = self.taxonomy_repository.load_outline()?;
        let taxonomy = self.enrich(&outline).await;
        let path = self.taxonomy_repository.save_taxonomy(&taxonomy)?;
        info!(
            "Saved {} companies across {} sectors to {}",
            taxonomy.total_companies(),
            taxonomy.sectors.len(),
            path.display()
        );
        Ok((taxonomy, path))
    }
}
