//! Prompt texts and per-request prompt builders.

use serde_json::{json, Value};

pub const COMPANY_GENERATOR_PREAMBLE: &str = "\
You are a financial market expert specialized in providing accurate company data.
Your task is to identify the top 9 companies by market capitalization for a specific industry subsector.

Guidelines:
1. Only include publicly traded companies
2. Ensure companies are primarily focused in the specified subsector
3. Provide current market capitalization in billions/trillions (B/T)
4. Sort companies by market cap (highest to lowest)
5. Only include real, verifiable companies";

pub const TICKER_LOOKUP_PREAMBLE: &str = "\
You are a financial data expert providing stock ticker symbols in JSON format. Rules:
1. Return a JSON array of objects with keys: 'name', 'sym', 'notes'
2. For major public companies, always provide the primary exchange ticker
3. Set 'notes' to null for successfully found tickers
4. Only set 'sym' to null if absolutely no ticker exists
5. For special cases, provide details in 'notes':
   - ADR tickers (note primary listing)
   - Multiple listings (list alternatives)
   - Private companies (explain status)
6. Use primary US exchange ticker when available (NYSE/NASDAQ)
7. No text outside the JSON array
8. No markdown formatting

Example: [{\"name\": \"Apple Inc.\", \"sym\": \"AAPL\", \"notes\": null}]";

pub fn companies_prompt(sector: &str, subsector: &str) -> String {
    format!(
        "Please provide the top 9 companies in the {} sector, specifically in the {} subsector.",
        sector, subsector
    )
}

/// One `- name (Market Cap: x)` line per company.
pub fn ticker_lookup_prompt<'a>(companies: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let list = companies
        .into_iter()
        .map(|(name, market_cap)| format!("- {} (Market Cap: {})", name, market_cap))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Return ticker symbols for:\n{}", list)
}

/// `response_format` constraining the reply to exactly `count` companies.
pub fn companies_response_format(count: usize) -> Value {
    json!({
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "get_companies_for_subsector",
                "schema": {
                    "type": "object",
                    "properties": {
                        "companies": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": {
                                        "type": "string",
                                        "description": "Company name"
                                    },
                                    "market_cap": {
                                        "type": "string",
                                        "description": "Market capitalization with B/T suffix (e.g., '2.5T' or '500B')"
                                    }
                                },
                                "required": ["name", "market_cap"]
                            },
                            "minItems": count,
                            "maxItems": count
                        }
                    },
                    "required": ["companies"],
                    "additionalProperties": false
                }
            }
        }
    })
}
