//! Cleanup and parsing of model replies.

use std::collections::HashMap;

use log::{debug, error};
use serde::Deserialize;

use tickermap_core::resolution::TickerLookupResult;
use tickermap_core::taxonomies::Company;

use crate::error::AiError;

/// Pull the JSON payload out of a reply.
///
/// Returns the first ```-fenced block (an optional `json` language tag
/// removed) that parses as JSON; otherwise the trimmed reply itself, valid
/// or not.
pub fn clean_json_response(response_text: &str) -> String {
    if response_text.contains("```") {
        for part in response_text.split("```") {
            let mut cleaned = part.trim();
            if cleaned.is_empty() {
                continue;
            }
            if let Some(tag) = cleaned.get(..5) {
                if tag.eq_ignore_ascii_case("json\n") {
                    cleaned = cleaned[5..].trim();
                }
            }
            if serde_json::from_str::<serde_json::Value>(cleaned).is_ok() {
                debug!("Found JSON inside fenced block");
                return cleaned.to_string();
            }
        }
    }

    response_text.trim().to_string()
}

/// Drop everything from the first `(` and trim spaces, commas, periods and
/// semicolons from both ends.
pub fn clean_company_name(name: &str) -> String {
    let head = name.split('(').next().unwrap_or(name);
    head.trim_matches(|c: char| matches!(c, ' ' | ',' | '.' | ';'))
        .to_string()
}

#[derive(Debug, Deserialize)]
struct CompaniesReply {
    companies: Vec<Company>,
}

/// Parse a structured `{ "companies": [...] }` reply.
pub fn parse_companies_reply(response_text: &str) -> Result<Vec<Company>, AiError> {
    let json = clean_json_response(response_text);
    serde_json::from_str::<CompaniesReply>(&json)
        .map(|reply| reply.companies)
        .map_err(|e| AiError::invalid_response(format!("companies reply: {}", e)))
}

#[derive(Debug, Deserialize)]
struct LookupItem {
    name: String,
    #[serde(default)]
    sym: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Map from cleaned prompt names back to the names we were given.
#[derive(Debug, Default)]
pub struct NameMap {
    originals: HashMap<String, String>,
}

impl NameMap {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let originals = names
            .into_iter()
            .map(|name| (clean_company_name(name), name.to_string()))
            .collect();
        Self { originals }
    }

    /// Original name for a name echoed by the model; unknown names pass
    /// through unchanged.
    pub fn original(&self, name: &str) -> String {
        self.originals
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

/// Parse a lookup reply into results keyed by original names.
///
/// Anything other than a JSON array of `{name, sym, notes}` is logged with
/// the raw reply and yields no results.
pub fn parse_lookup_reply(response_text: &str, names: &NameMap) -> Vec<TickerLookupResult> {
    let json = clean_json_response(response_text);
    match serde_json::from_str::<Vec<LookupItem>>(&json) {
        Ok(items) => items
            .into_iter()
            .map(|item| TickerLookupResult {
                name: names.original(&item.name),
                sym: item.sym,
                notes: item.notes,
            })
            .collect(),
        Err(e) => {
            error!("Failed to parse JSON response: {}", e);
            error!("Raw response: {:?}", response_text);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_response_fenced() {
        let reply = "Here you go:\n```json\n[{\"name\": \"Apple\", \"sym\": \"AAPL\", \"notes\": null}]\n```\nAnything else?";
        assert_eq!(
            clean_json_response(reply),
            "[{\"name\": \"Apple\", \"sym\": \"AAPL\", \"notes\": null}]"
        );
    }

    #[test]
    fn test_clean_json_response_skips_invalid_blocks() {
        let reply = "```\nnot json\n```\n```JSON\n{\"a\": 1}\n```";
        assert_eq!(clean_json_response(reply), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_json_response_plain() {
        assert_eq!(clean_json_response("  [1, 2]\n"), "[1, 2]");
        assert_eq!(clean_json_response(" nope "), "nope");
    }

    #[test]
    fn test_clean_company_name() {
        assert_eq!(clean_company_name("Alphabet Inc. (Google)"), "Alphabet Inc");
        assert_eq!(clean_company_name("Samsung Electronics,"), "Samsung Electronics");
        assert_eq!(clean_company_name(" Tesla; "), "Tesla");
        assert_eq!(clean_company_name("Nvidia"), "Nvidia");
    }

    #[test]
    fn test_parse_companies_reply() {
        let reply = r#"{"companies": [{"name": "Apple", "market_cap": "3T"}]}"#;
        let companies = parse_companies_reply(reply).unwrap();
        assert_eq!(companies, vec![Company::new("Apple", "3T")]);

        let err = parse_companies_reply("I cannot help with that").unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_lookup_reply_maps_original_names() {
        let names = NameMap::new(["Alphabet Inc. (Google)", "SpaceX"]);
        let reply = r#"[
            {"name": "Alphabet Inc", "sym": "GOOGL", "notes": null},
            {"name": "SpaceX", "sym": null, "notes": "Private company"},
            {"name": "Unrequested Corp", "sym": "UNR"}
        ]"#;

        let results = parse_lookup_reply(reply, &names);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "Alphabet Inc. (Google)");
        assert_eq!(results[0].sym.as_deref(), Some("GOOGL"));
        assert_eq!(results[1].name, "SpaceX");
        assert_eq!(results[1].sym, None);
        assert_eq!(results[1].notes.as_deref(), Some("Private company"));
        assert_eq!(results[2].name, "Unrequested Corp");
        assert_eq!(results[2].notes, None);
    }

    #[test]
    fn test_parse_lookup_reply_malformed_is_empty() {
        let names = NameMap::new(["Apple"]);
        assert!(parse_lookup_reply("Sorry, no data.", &names).is_empty());
        assert!(parse_lookup_reply(r#"{"name": "Apple"}"#, &names).is_empty());
    }
}
