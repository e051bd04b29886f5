use std::path::PathBuf;

use tickermap_core::Error;

pub const FINNHUB_API_KEY: &str = "FINNHUB_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PPL_API_KEY: &str = "PPL_API_KEY";

pub struct Config {
    pub data_dir: PathBuf,
    pub log_format: String,
    pub finnhub_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub perplexity_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub perplexity_model: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            data_dir: non_empty("TICKERMAP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_format: non_empty("TICKERMAP_LOG_FORMAT").unwrap_or_else(|| "text".into()),
            finnhub_api_key: non_empty(FINNHUB_API_KEY),
            openai_api_key: non_empty(OPENAI_API_KEY),
            perplexity_api_key: non_empty(PPL_API_KEY),
            openai_model: non_empty("TICKERMAP_OPENAI_MODEL"),
            perplexity_model: non_empty("TICKERMAP_PERPLEXITY_MODEL"),
        }
    }

    /// The credential `name`, or `MissingConfigKey` before any work starts.
    pub fn require(value: &Option<String>, name: &str) -> Result<String, Error> {
        value
            .clone()
            .ok_or_else(|| Error::MissingConfigKey(format!("{} environment variable not set", name)))
    }
}
