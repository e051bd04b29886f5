//! Report of taxonomy companies missing from the latest mapping.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::mappings::LoadedArtifact;
use crate::taxonomies::Taxonomy;

/// One taxonomy occurrence of an unmapped company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedCompany {
    pub name: String,
    pub sector: String,
    pub subsector: String,
    pub market_cap: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedMetadata {
    /// Distinct company names in the taxonomy
    pub total_companies: usize,
    /// Keys of the latest mapping, null values included
    pub mapped_companies: usize,
    /// Distinct taxonomy names absent from the mapping
    pub unmapped_companies: usize,
    pub latest_mapping_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedReport {
    pub metadata: UnmappedMetadata,
    pub unmapped: Vec<UnmappedCompany>,
}

/// Parse a market cap such as "2.5T", "$500B" or "750M" into dollars.
///
/// "N/A", "Not publicly traded" and anything unparsable count as 0 so they
/// sort last. A bare number is taken as-is.
pub fn parse_market_cap(market_cap: &str) -> f64 {
    let trimmed = market_cap.trim();
    if trimmed.is_empty() || trimmed == "N/A" || trimmed == "Not publicly traded" {
        return 0.0;
    }

    let value = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let (number, multiplier) = match value.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('T') => (&value[..value.len() - 1], 1e12),
        Some('B') => (&value[..value.len() - 1], 1e9),
        Some('M') => (&value[..value.len() - 1], 1e6),
        _ => (value, 1.0),
    };

    match number.trim().parse::<f64>() {
        Ok(parsed) => parsed * multiplier,
        Err(_) => {
            warn!("Could not parse market cap: {}", market_cap);
            0.0
        }
    }
}

/// Every taxonomy name that is not a key of the latest mapping, with one
/// entry per taxonomy occurrence, largest market cap first.
pub fn find_unmapped(taxonomy: &Taxonomy, latest: Option<&LoadedArtifact>) -> UnmappedReport {
    let all_companies = taxonomy.unique_company_names();
    let mapped: BTreeSet<&str> = latest
        .map(|artifact| artifact.mappings().keys().map(String::as_str).collect())
        .unwrap_or_default();

    let unmapped_names: BTreeSet<&str> = all_companies
        .iter()
        .map(String::as_str)
        .filter(|name| !mapped.contains(name))
        .collect();

    let mut unmapped: Vec<UnmappedCompany> = taxonomy
        .entries()
        .filter(|(_, _, company)| unmapped_names.contains(company.name.as_str()))
        .map(|(sector, subsector, company)| UnmappedCompany {
            name: company.name.clone(),
            sector: sector.name.clone(),
            subsector: subsector.name.clone(),
            market_cap: company.market_cap.clone(),
        })
        .collect();

    unmapped.sort_by(|a, b| {
        parse_market_cap(&b.market_cap)
            .partial_cmp(&parse_market_cap(&a.market_cap))
            .unwrap_or(Ordering::Equal)
    });

    UnmappedReport {
        metadata: UnmappedMetadata {
            total_companies: all_companies.len(),
            mapped_companies: mapped.len(),
            unmapped_companies: unmapped_names.len(),
            latest_mapping_file: latest.map(LoadedArtifact::file_name),
        },
        unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::mappings::{Mapping, MappingArtifact, MappingValue};
    use crate::taxonomies::{Company, Sector, Subsector};

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            sectors: vec![
                Sector {
                    name: "Technology".to_string(),
                    subsectors: vec![Subsector {
                        name: "AI".to_string(),
                        companies: vec![
                            Company::new("OpenAI", "Not publicly traded"),
                            Company::new("NVIDIA Corporation", "3.2T"),
                            Company::new("Palantir", "50B"),
                            Company::new("Tiny AI", "750M"),
                        ],
                    }],
                    extra: Default::default(),
                },
                Sector {
                    name: "Finance".to_string(),
                    subsectors: vec![Subsector {
                        name: "Fintech".to_string(),
                        companies: vec![
                            Company::new("Palantir", "50B"),
                            Company::new("Stripe", "N/A"),
                        ],
                    }],
                    extra: Default::default(),
                },
            ],
        }
    }

    fn artifact(entries: &[(&str, Option<&str>)]) -> LoadedArtifact {
        let mappings: Mapping = entries
            .iter()
            .map(|(name, symbol)| (name.to_string(), symbol.map(MappingValue::from)))
            .collect();
        LoadedArtifact {
            path: PathBuf::from("data/company_ticker_map_4.json"),
            artifact: MappingArtifact {
                mappings,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_parse_market_cap() {
        assert_eq!(parse_market_cap("2.5T"), 2.5e12);
        assert_eq!(parse_market_cap("$500B"), 500e9);
        assert_eq!(parse_market_cap("750M"), 750e6);
        assert_eq!(parse_market_cap("1500"), 1500.0);
        assert_eq!(parse_market_cap("N/A"), 0.0);
        assert_eq!(parse_market_cap("Not publicly traded"), 0.0);
        assert_eq!(parse_market_cap("about a billion"), 0.0);
        assert_eq!(parse_market_cap(""), 0.0);
    }

    #[test]
    fn test_unmapped_sorted_by_market_cap() {
        let latest = artifact(&[("NVIDIA Corporation", Some("NVDA"))]);
        let report = find_unmapped(&taxonomy(), Some(&latest));

        let names: Vec<&str> = report.unmapped.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names[..3], ["Palantir", "Palantir", "Tiny AI"]);
        // Zero-valued caps keep taxonomy order.
        assert_eq!(names[3..], ["OpenAI", "Stripe"]);
        assert_eq!(report.unmapped[1].sector, "Finance");
    }

    #[test]
    fn test_null_mapping_counts_as_mapped() {
        let latest = artifact(&[("OpenAI", None), ("Stripe", None)]);
        let report = find_unmapped(&taxonomy(), Some(&latest));

        assert_eq!(report.metadata.total_companies, 5);
        assert_eq!(report.metadata.mapped_companies, 2);
        assert_eq!(report.metadata.unmapped_companies, 3);
        assert_eq!(
            report.metadata.latest_mapping_file.as_deref(),
            Some("company_ticker_map_4.json")
        );
        assert!(report.unmapped.iter().all(|c| c.name != "OpenAI"));
    }

    #[test]
    fn test_without_mapping_everything_is_unmapped() {
        let report = find_unmapped(&taxonomy(), None);
        assert_eq!(report.metadata.unmapped_companies, 5);
        assert_eq!(report.unmapped.len(), 6);
        assert_eq!(report.metadata.latest_mapping_file, None);
    }
}
