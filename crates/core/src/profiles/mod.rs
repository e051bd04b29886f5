//! Profiles module - company profiles for every mapped symbol.

mod profile_model;
mod profile_service;

pub use profile_model::{ProfileCache, ProfileCacheMetadata};
pub use profile_service::ProfileService;
