//! Resolution flows over the taxonomy, mapping artifacts and unmapped report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};

use crate::constants::SOURCE_PERPLEXITY;
use crate::errors::Error;
use crate::mappings::{Mapping, MappingMetadata, MappingRepositoryTrait, MappingValue};
use crate::taxonomies::TaxonomyRepositoryTrait;
use crate::utils::json_file::{load_json, save_json};
use crate::Result;

use super::{
    count_mapped, find_unmapped, merge_mappings, BatchOrchestrator, BatchTickerLookup,
    ResolutionOutcome, ResolutionRun, UnmappedReport,
};

pub struct ResolutionService {
    taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
    mapping_repository: Arc<dyn MappingRepositoryTrait>,
    unmapped_path: PathBuf,
}

impl ResolutionService {
    pub fn new(
        taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
        mapping_repository: Arc<dyn MappingRepositoryTrait>,
        unmapped_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            taxonomy_repository,
            mapping_repository,
            unmapped_path: unmapped_path.into(),
        }
    }

    fn load_unmapped(&self) -> Result<UnmappedReport> {
        load_json(&self.unmapped_path).map_err(|e| Error::input_file(&self.unmapped_path, e))
    }

    fn latest_mappings(&self) -> (Mapping, usize) {
        match self.mapping_repository.load_latest() {
            Some(latest) => {
                info!(
                    "Using mappings from {} ({} entries)",
                    latest.file_name(),
                    latest.mappings().len()
                );
                let total = latest.artifact.metadata.total_companies;
                (latest.artifact.mappings, total)
            }
            None => {
                info!("No existing mapping file found");
                (Mapping::new(), 0)
            }
        }
    }

    /// Resolve every taxonomy company not yet in the latest artifact and
    /// write the merged result as a new artifact. Always writes.
    pub async fn resolve_taxonomy(
        &self,
        orchestrator: &BatchOrchestrator,
        source: &str,
    ) -> Result<ResolutionRun> {
        let taxonomy = self.taxonomy_repository.load_taxonomy()?;
        let (existing, _) = self.latest_mappings();

        let outcome = orchestrator.run(&taxonomy.company_names(), &existing).await;
        let merged = merge_mappings(&existing, &outcome.mappings);

        let mut metadata = MappingMetadata::now(source)
            .with_mapped_companies(count_mapped(&merged))
            .with_source_file(file_name(self.taxonomy_repository.taxonomy_path()));
        metadata.total_companies = taxonomy.total_companies();

        let output_file = self.mapping_repository.save_next(&merged, metadata)?;
        info!(
            "Successfully mapped {}/{} companies",
            count_mapped(&merged),
            taxonomy.total_companies()
        );

        Ok(ResolutionRun {
            outcome,
            output_file: Some(output_file),
        })
    }

    /// Resolve the companies listed in the unmapped report. Writes a new
    /// artifact only when something was found.
    pub async fn resolve_unmapped(
        &self,
        orchestrator: &BatchOrchestrator,
        source: &str,
    ) -> Result<ResolutionRun> {
        let report = self.load_unmapped()?;
        let (existing, previous_total) = self.latest_mappings();

        let candidates: Vec<String> = report.unmapped.iter().map(|c| c.name.clone()).collect();
        let outcome = orchestrator.run(&candidates, &existing).await;

        if outcome.mappings.is_empty() {
            info!("No new mappings found");
            return Ok(ResolutionRun {
                outcome,
                output_file: None,
            });
        }

        let merged = merge_mappings(&existing, &outcome.mappings);
        let mut metadata = MappingMetadata::now(source)
            .with_mapped_companies(count_mapped(&merged))
            .with_source_file(file_name(&self.unmapped_path));
        metadata.total_companies = previous_total.max(report.metadata.total_companies);

        let output_file = self.mapping_repository.save_next(&merged, metadata)?;
        info!("Found {} new mappings", outcome.mappings.len());

        Ok(ResolutionRun {
            outcome,
            output_file: Some(output_file),
        })
    }

    /// Send the unmapped companies to `lookup` in batches of `batch_size`.
    ///
    /// Every returned entry is recorded, a null symbol included, so the
    /// company counts as processed next time. Failed batches are logged and
    /// skipped. Writes only when some batch returned entries.
    pub async fn resolve_unmapped_with_llm(
        &self,
        lookup: &dyn BatchTickerLookup,
        batch_size: usize,
    ) -> Result<ResolutionRun> {
        let report = self.load_unmapped()?;
        let (existing, _) = self.latest_mappings();

        let companies = &report.unmapped;
        let total = companies.len();
        let batch_size = batch_size.max(1);
        let mut outcome = ResolutionOutcome::default();

        for (batch_index, batch) in companies.chunks(batch_size).enumerate() {
            let start = batch_index * batch_size;
            info!(
                "Processing batch {} ({}-{}/{})",
                batch_index + 1,
                start + 1,
                start + batch.len(),
                total
            );
            outcome.attempted += batch.len();

            match lookup.lookup_batch(batch).await {
                Ok(results) => {
                    for result in results {
                        match &result.notes {
                            Some(notes) => info!(
                                "{} -> {} ({})",
                                result.name,
                                result.sym.as_deref().unwrap_or("null"),
                                notes
                            ),
                            None => info!(
                                "{} -> {}",
                                result.name,
                                result.sym.as_deref().unwrap_or("null")
                            ),
                        }
                        if result.sym.is_some() {
                            outcome.resolved += 1;
                        } else {
                            outcome.unresolved += 1;
                        }
                        outcome
                            .mappings
                            .insert(result.name, result.sym.map(MappingValue::Symbol));
                    }
                }
                Err(e) => {
                    error!("Batch {} failed: {}", batch_index + 1, e);
                    outcome.failed += batch.len();
                }
            }
        }

        if outcome.mappings.is_empty() {
            info!("No new mappings found");
            return Ok(ResolutionRun {
                outcome,
                output_file: None,
            });
        }

        let merged = merge_mappings(&existing, &outcome.mappings);
        let mut metadata = MappingMetadata::now(SOURCE_PERPLEXITY)
            .with_mapped_companies(count_mapped(&merged))
            .with_source_file(file_name(&self.unmapped_path));
        metadata.total_companies = report.metadata.total_companies;

        let output_file = self.mapping_repository.save_next(&merged, metadata)?;
        info!(
            "Saved {} new mappings to {}",
            outcome.mappings.len(),
            output_file.display()
        );

        Ok(ResolutionRun {
            outcome,
            output_file: Some(output_file),
        })
    }

    /// Compare the taxonomy with the latest artifact and write the unmapped
    /// report, replacing the previous one.
    pub fn write_unmapped_report(&self) -> Result<UnmappedReport> {
        let taxonomy = self.taxonomy_repository.load_taxonomy()?;
        let latest = self.mapping_repository.load_latest();
        if latest.is_none() {
            info!("No existing mapping file found");
        }

        let report = find_unmapped(&taxonomy, latest.as_ref());
        save_json(&self.unmapped_path, &report)?;

        info!(
            "Found {} unmapped companies out of {}",
            report.metadata.unmapped_companies, report.metadata.total_companies
        );
        for company in report.unmapped.iter().take(10) {
            info!("  - {} ({})", company.name, company.market_cap);
        }
        info!("Results saved to {}", self.unmapped_path.display());

        Ok(report)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
