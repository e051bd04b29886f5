//! Company name normalization and search-term selection.

/// Corporate suffix tokens dropped from a lowercased name.
pub const COMPANY_SUFFIXES: &[&str] = &[
    "inc",
    "inc.",
    "corp",
    "corp.",
    "corporation",
    "ltd",
    "ltd.",
    "limited",
    "plc",
    "s.a.",
    "ag",
    "co.",
];

/// Names that search poorly under their legal name. Checked in order; the
/// first key found in the name replaces the whole search term.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("alphabet inc", "google"),
    ("meta platforms", "facebook"),
    ("amazon", "amazon.com"),
    ("berkshire hathaway", "brk"),
];

/// Well-known names with a fixed ticker, for providers whose search ranks
/// large caps poorly. Not enabled by default.
///
/// Entries are returned as-is with [`crate::resolver::MatchTier::Known`];
/// the symbol is never checked against the provider.
pub const KNOWN_TICKERS: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("alphabet", "GOOGL"),
    ("google", "GOOGL"),
    ("amazon", "AMZN"),
    ("meta platforms", "META"),
    ("facebook", "META"),
    ("tesla", "TSLA"),
    ("berkshire hathaway", "BRK-B"),
    ("jpmorgan chase", "JPM"),
    ("johnson & johnson", "JNJ"),
    ("walmart", "WMT"),
    ("procter & gamble", "PG"),
    ("exxonmobil", "XOM"),
    ("coca-cola", "KO"),
    ("pfizer", "PFE"),
    ("bank of america", "BAC"),
    ("home depot", "HD"),
    ("chevron", "CVX"),
    ("cisco", "CSCO"),
    ("pepsico", "PEP"),
    ("adobe", "ADBE"),
    ("netflix", "NFLX"),
    ("costco", "COST"),
    ("thermo fisher", "TMO"),
    ("verizon", "VZ"),
    ("abbott", "ABT"),
    ("abbvie", "ABBV"),
    ("salesforce", "CRM"),
    ("merck", "MRK"),
    ("comcast", "CMCSA"),
    ("mcdonalds", "MCD"),
    ("t-mobile", "TMUS"),
];

/// Turns company names into provider search terms.
#[derive(Clone, Debug)]
pub struct NameNormalizer {
    aliases: Vec<(String, String)>,
    known_tickers: Vec<(String, String)>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            known_tickers: Vec::new(),
        }
    }
}

impl NameNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alias table. Keys must be lowercase.
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases = aliases
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Enable a known-ticker table. Keys must be lowercase.
    pub fn with_known_tickers<I, K, V>(mut self, known: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.known_tickers = known
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Lowercase, drop corporate suffix tokens, strip trailing commas and
    /// periods, trim.
    pub fn normalize(&self, company_name: &str) -> String {
        let lowered = company_name.to_lowercase();
        let kept: Vec<&str> = lowered
            .split_whitespace()
            .filter(|token| !COMPANY_SUFFIXES.contains(&token.trim_end_matches(',')))
            .collect();

        kept.join(" ")
            .trim_end_matches(|c: char| c == ',' || c == '.')
            .trim()
            .to_string()
    }

    /// The term to send to the provider: the normalized name, or the value
    /// of the first alias whose key appears in the normalized or the
    /// lowercased original name.
    pub fn search_term(&self, company_name: &str) -> String {
        let normalized = self.normalize(company_name);
        let lowered = company_name.to_lowercase();

        self.aliases
            .iter()
            .find(|(key, _)| normalized.contains(key.as_str()) || lowered.contains(key.as_str()))
            .map(|(_, alias)| alias.clone())
            .unwrap_or(normalized)
    }

    /// Ticker from the known-ticker table, if one of its names appears in
    /// the normalized name.
    pub fn known_ticker(&self, company_name: &str) -> Option<&str> {
        if self.known_tickers.is_empty() {
            return None;
        }
        let normalized = self.normalize(company_name);
        self.known_tickers
            .iter()
            .find(|(name, _)| normalized.contains(name.as_str()))
            .map(|(_, ticker)| ticker.as_str())
    }
}
