pub mod enrich;
pub mod maintenance;
pub mod resolve;
