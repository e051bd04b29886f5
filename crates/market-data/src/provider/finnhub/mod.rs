//! Finnhub client: symbol lookup (`/search?q=`) and company profiles
//! (`/stock/profile2?symbol=`).
//!
//! The free tier allows 60 calls per minute; the declared limit is 45.
//! The API key travels in the `X-Finnhub-Token` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{CompanyProfile, SearchResult, SecurityType};
use crate::provider::{MarketDataProvider, ProviderCapabilities, RateLimit};

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// `/search` payload; the `count` field is ignored
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchItem>,
}

/// One `/search` candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    description: String,
    /// Symbol as Finnhub displays it
    display_symbol: String,
    symbol: String,
    /// "Common Stock", "ETP", "ADR", ...
    #[serde(rename = "type")]
    security_type: String,
}

/// `{"error": "..."}` body sent with 4xx answers
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// Search and profile provider over the Finnhub REST API.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a provider pointed at a different API root.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    /// GET `endpoint` and return the body of a successful answer.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::provider(PROVIDER_ID, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        // Handle rate limiting; 403 is what Finnhub returns once the quota is spent
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Invalid or missing API key",
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status, &body));
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to read response: {}", e)))
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let text = self.fetch("/stock/profile2", &[("symbol", symbol)]).await?;
        parse_profile_response(symbol, &text)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let text = self.fetch("/search", &[("q", query)]).await?;
        let results = parse_search_response(&text)?;

        debug!("{} Finnhub candidates for '{}'", results.len(), query);

        Ok(results)
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supports_search: true,
            supports_profile: true,
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit::per_minute(45)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        self.search_symbols(query).await
    }

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        debug!("Finnhub profile lookup: {}", symbol);
        self.fetch_profile(symbol).await
    }
}

fn parse_error_body(status: reqwest::StatusCode, body: &str) -> MarketDataError {
    if let Ok(ErrorResponse { error: Some(message) }) = serde_json::from_str(body) {
        return MarketDataError::provider(PROVIDER_ID, message);
    }
    MarketDataError::provider(PROVIDER_ID, format!("HTTP {} - {}", status, body))
}

fn parse_search_response(text: &str) -> Result<Vec<SearchResult>, MarketDataError> {
    let response: SearchResponse = serde_json::from_str(text).map_err(|e| {
        MarketDataError::provider(PROVIDER_ID, format!("Failed to parse search response: {}", e))
    })?;

    Ok(response
        .result
        .into_iter()
        .map(|item| {
            SearchResult::new(
                item.symbol,
                item.description,
                item.display_symbol,
                SecurityType::parse(&item.security_type),
            )
        })
        .collect())
}

fn parse_profile_response(symbol: &str, text: &str) -> Result<CompanyProfile, MarketDataError> {
    let profile: CompanyProfile = serde_json::from_str(text).map_err(|e| {
        MarketDataError::provider(PROVIDER_ID, format!("Failed to parse profile response: {}", e))
    })?;

    // Unknown symbols come back as `{}`
    if profile.is_empty() {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_search_profile_and_45_per_minute() {
        let provider = FinnhubProvider::new("key".to_string());
        assert_eq!(provider.id(), "FINNHUB");
        assert!(provider.capabilities().supports_search);
        assert!(provider.capabilities().supports_profile);
        assert_eq!(provider.rate_limit(), RateLimit::per_minute(45));
    }

    #[test]
    fn test_search_response_parsing() {
        let json = r#"{
            "count": 3,
            "result": [
                {
                    "description": "APPLE INC",
                    "displaySymbol": "AAPL",
                    "symbol": "AAPL",
                    "type": "Common Stock"
                },
                {
                    "description": "APPLE HOSPITALITY REIT INC",
                    "displaySymbol": "APLE",
                    "symbol": "APLE",
                    "type": "REIT"
                },
                {
                    "description": "APPLE INC",
                    "displaySymbol": "AAPL.SW",
                    "symbol": "AAPL.SW",
                    "type": "Common Stock"
                }
            ]
        }"#;

        let results = parse_search_response(json).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].symbol, "AAPL");
        assert_eq!(results[0].security_type, SecurityType::CommonStock);
        assert_eq!(results[1].security_type, SecurityType::Reit);
        assert_eq!(results[2].exchange_suffix(), Some("SW"));
    }

    #[test]
    fn test_search_response_without_results() {
        let results = parse_search_response(r#"{"count": 0}"#).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_response_malformed() {
        let err = parse_search_response("<html>").unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }

    #[test]
    fn test_profile_keeps_provider_fields() {
        let json = r#"{
            "country": "US",
            "currency": "USD",
            "exchange": "NASDAQ NMS - GLOBAL MARKET",
            "finnhubIndustry": "Semiconductors",
            "ipo": "1999-01-22",
            "marketCapitalization": 3012345.6,
            "name": "NVIDIA Corp",
            "phone": "14084862000",
            "ticker": "NVDA"
        }"#;

        let profile = parse_profile_response("NVDA", json).unwrap();
        assert_eq!(profile.name.as_deref(), Some("NVIDIA Corp"));
        assert_eq!(profile.finnhub_industry.as_deref(), Some("Semiconductors"));
        assert_eq!(profile.ipo.as_deref(), Some("1999-01-22"));
        assert_eq!(profile.market_capitalization, Some(3012345.6));
        assert!(profile.logo.is_none());
        assert_eq!(profile.extra["phone"], "14084862000");

        let written = serde_json::to_value(&profile).unwrap();
        assert_eq!(written["phone"], "14084862000");
        assert_eq!(written["finnhubIndustry"], "Semiconductors");
    }

    #[test]
    fn test_empty_profile_is_not_found() {
        let err = parse_profile_response("NOPE", "{}").unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));

        let err = parse_profile_response("NOPE", r#"{"country": "US"}"#).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_error_body_parsing() {
        let err = parse_error_body(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error": "Invalid symbol"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Provider error: FINNHUB - Invalid symbol"
        );

        let err = parse_error_body(reqwest::StatusCode::BAD_GATEWAY, "upstream");
        assert!(err.to_string().contains("HTTP 502"));
    }
}
