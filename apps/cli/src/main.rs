//! Tickermap CLI.
//!
//! # Usage
//!
//! ```bash
//! # Build enriched_market_matrix.json from the sector outline
//! tickermap enrich
//!
//! # Resolve every taxonomy company through Finnhub
//! tickermap resolve
//!
//! # Retry the unmapped report through Yahoo search, then an LLM
//! tickermap unmapped
//! tickermap resolve --provider yahoo --unmapped
//! tickermap llm-resolve --batch-size 20
//!
//! # Maintenance
//! tickermap dedupe
//! tickermap stats
//! tickermap profiles
//! ```

use clap::{Parser, Subcommand};
use tracing::info;

mod commands;
mod config;
mod main_lib;

use commands::enrich::run_enrich;
use commands::maintenance::{run_dedupe, run_profiles, run_stats, run_unmapped};
use commands::resolve::{run_llm_resolve, run_resolve, SearchProvider};
use config::Config;
use main_lib::{init_tracing, DataDir};
use tickermap_core::constants::DEFAULT_LLM_BATCH_SIZE;

#[derive(Parser)]
#[command(name = "tickermap")]
#[command(about = "Enrich a sector taxonomy with companies and stock tickers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the top companies of every subsector (OpenAI)
    Enrich,

    /// Resolve company names to ticker symbols
    Resolve {
        /// Search backend
        #[arg(short, long, value_enum, default_value = "finnhub")]
        provider: SearchProvider,

        /// Only retry the companies in unmapped_companies.json
        #[arg(long, default_value = "false")]
        unmapped: bool,
    },

    /// Write unmapped_companies.json from the taxonomy and latest mapping
    Unmapped,

    /// Look up unmapped companies with an LLM (Perplexity)
    LlmResolve {
        /// Companies per request
        #[arg(short, long, default_value_t = DEFAULT_LLM_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Annotate duplicate tickers into a new mapping file
    Dedupe,

    /// Count unique ticker symbols in the latest mapping
    Stats,

    /// Fetch company profiles for every mapped symbol (Finnhub)
    Profiles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let data = DataDir::open(&config.data_dir);
    info!("Data directory: {}", config.data_dir.display());

    match cli.command {
        Commands::Enrich => run_enrich(&config, &data).await?,
        Commands::Resolve { provider, unmapped } => {
            run_resolve(&config, &data, provider, unmapped).await?
        }
        Commands::Unmapped => run_unmapped(&data)?,
        Commands::LlmResolve { batch_size } => run_llm_resolve(&config, &data, batch_size).await?,
        Commands::Dedupe => run_dedupe(&data)?,
        Commands::Stats => {
            run_stats(&data)?;
        }
        Commands::Profiles => run_profiles(&config, &data).await?,
    }

    Ok(())
}
