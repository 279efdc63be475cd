//! CLI command implementations.

pub mod dashboard;
pub mod export;
pub mod summary;
