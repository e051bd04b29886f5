//! Taxonomy domain models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A company listed under a subsector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Free-form market cap as reported, e.g. "2.5T", "500B", "N/A"
    pub market_cap: String,
}

impl Company {
    pub fn new(name: impl Into<String>, market_cap: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            market_cap: market_cap.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsector {
    pub name: String,
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub subsectors: Vec<Subsector>,
    /// Other sector keys carried over from the outline.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sectors, subsectors and their top companies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub sectors: Vec<Sector>,
}

impl Taxonomy {
    /// Every (sector, subsector, company) in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&Sector, &Subsector, &Company)> {
        self.sectors.iter().flat_map(|sector| {
            sector.subsectors.iter().flat_map(move |subsector| {
                subsector
                    .companies
                    .iter()
                    .map(move |company| (sector, subsector, company))
            })
        })
    }

    /// Company names in file order, repeats included.
    pub fn company_names(&self) -> Vec<String> {
        self.entries()
            .map(|(_, _, company)| company.name.clone())
            .collect()
    }

    /// Distinct company names.
    pub fn unique_company_names(&self) -> BTreeSet<String> {
        self.entries()
            .map(|(_, _, company)| company.name.clone())
            .collect()
    }

    /// Number of company entries, repeats included.
    pub fn total_companies(&self) -> usize {
        self.sectors
            .iter()
            .flat_map(|sector| &sector.subsectors)
            .map(|subsector| subsector.companies.len())
            .sum()
    }
}

/// A sector of the enrichment input: subsectors by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSector {
    pub name: String,
    pub subsectors: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Enrichment input listing sectors and subsector names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorOutline {
    pub sectors: Vec<OutlineSector>,
}

impl SectorOutline {
    /// (sector, subsector) pairs in file order.
    pub fn subsector_pairs(&self) -> Vec<(String, String)> {
        self.sectors
            .iter()
            .flat_map(|sector| {
                sector
                    .subsectors
                    .iter()
                    .map(move |subsector| (sector.name.clone(), subsector.clone()))
            })
            .collect()
    }
}
