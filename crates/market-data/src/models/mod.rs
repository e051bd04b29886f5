//! Market data models
//!
//! - `search` - Search result data (SearchResult, SecurityType)
//! - `profile` - Company profile data (CompanyProfile)

mod profile;
mod search;

pub use profile::{format_market_cap, CompanyProfile};
pub use search::{SearchResult, SecurityType};
