use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A provider's description of one listed company.
///
/// Field names follow the provider payload (camelCase) so the cached
/// profile file reads like the provider's own response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Listing exchange (e.g., "NASDAQ NMS - GLOBAL MARKET")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// Finnhub's own industry label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finnhub_industry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weburl: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// IPO date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipo: Option<String>,

    /// Market capitalization, in millions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_capitalization: Option<f64>,

    /// Shares outstanding, in millions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_outstanding: Option<f64>,

    /// Remaining payload fields (phone, estimateCurrency, ...), kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompanyProfile {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// In millions, as Finnhub reports it.
    pub fn market_capitalization(mut self, millions: f64) -> Self {
        self.market_capitalization = Some(millions);
        self
    }

    /// True when the provider returned nothing that identifies a company.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ticker.is_none()
    }
}

/// Render a market capitalization given in millions as `$x.xxT`, `$x.xxB`
/// or `$x.xxM`.
pub fn format_market_cap(millions: f64) -> String {
    if millions >= 1_000_000.0 {
        format!("${:.2}T", millions / 1_000_000.0)
    } else if millions >= 1_000.0 {
        format!("${:.2}B", millions / 1_000.0)
    } else {
        format!("${:.2}M", millions)
    }
}
