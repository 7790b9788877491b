//! CLI command implementations.

pub mod export;
pub mod ingest;
pub mod rank;
pub mod tables;
