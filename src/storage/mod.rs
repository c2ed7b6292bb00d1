//! Storage layer for profiles and group memberships

/// Database storage module
pub mod database;

pub use database::{Database, DatabaseBackendType, DatabaseStats, TransactionGroupStore};
