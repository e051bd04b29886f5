//! Search result models for symbol lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Security classification reported by a provider's search endpoint.
///
/// Providers spell these differently (Finnhub says "Common Stock", Yahoo says
/// "EQUITY"); [`SecurityType::parse`] folds them into one vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SecurityType {
    CommonStock,
    Etf,
    MutualFund,
    Adr,
    Reit,
    Warrant,
    Preferred,
    Unit,
    ClosedEndFund,
    Other(String),
}

impl SecurityType {
    /// Map a provider security type string to a [`SecurityType`].
    pub fn parse(provider_type: &str) -> Self {
        match provider_type.trim().to_lowercase().as_str() {
            "common stock" | "stock" | "equity" => Self::CommonStock,
            "etf" | "etp" => Self::Etf,
            "mutual fund" | "mutualfund" | "fund" => Self::MutualFund,
            "adr" | "american depositary receipt" => Self::Adr,
            "reit" => Self::Reit,
            "warrant" => Self::Warrant,
            "preferred stock" | "preferred" => Self::Preferred,
            "unit" => Self::Unit,
            "closed-end fund" => Self::ClosedEndFund,
            _ => Self::Other(provider_type.to_string()),
        }
    }

    /// Ordinary publicly tradable shares, as opposed to funds, warrants, etc.
    pub fn is_common_equity(&self) -> bool {
        matches!(self, Self::CommonStock)
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommonStock => "Common Stock",
            Self::Etf => "ETF",
            Self::MutualFund => "Mutual Fund",
            Self::Adr => "ADR",
            Self::Reit => "REIT",
            Self::Warrant => "Warrant",
            Self::Preferred => "Preferred Stock",
            Self::Unit => "Unit",
            Self::ClosedEndFund => "Closed-End Fund",
            Self::Other(raw) => raw,
        };
        f.write_str(label)
    }
}

impl From<String> for SecurityType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<SecurityType> for String {
    fn from(value: SecurityType) -> Self {
        value.to_string()
    }
}

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL", "SHOP.TO")
    pub symbol: String,

    /// Company description as returned by the provider (e.g., "APPLE INC")
    pub description: String,

    /// Exchange name or display symbol hint (e.g., "NASDAQ", "AAPL")
    pub exchange: String,

    /// Security classification
    pub security_type: SecurityType,

    /// Relevance score from provider (higher = better match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Create a new search result with required fields.
    pub fn new(
        symbol: impl Into<String>,
        description: impl Into<String>,
        exchange: impl Into<String>,
        security_type: SecurityType,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            description: description.into(),
            exchange: exchange.into(),
            security_type,
            score: None,
        }
    }

    /// Set the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Exchange suffix of the symbol ("L" for "ABC.L"), `None` for a
    /// domestic listing.
    pub fn exchange_suffix(&self) -> Option<&str> {
        self.symbol.split_once('.').map(|(_, suffix)| suffix)
    }

    /// Common equity listed without an exchange suffix.
    pub fn is_domestic_equity(&self) -> bool {
        self.security_type.is_common_equity() && self.exchange_suffix().is_none()
    }
}
