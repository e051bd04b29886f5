//! Provider errors arrive as [`MarketDataError`] from the market-data crate
//! or as plain strings from the LLM-backed implementations in the ai crate.

use std::path::PathBuf;

use thiserror::Error;

use tickermap_market_data::MarketDataError;

pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the enrichment and mapping pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Failed to read input file {path}: {message}")]
    InputFile { path: PathBuf, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Wrap a failure to load one of the pipeline's primary inputs.
    pub fn input_file(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Error::InputFile {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
