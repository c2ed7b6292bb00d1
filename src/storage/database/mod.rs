//! Database storage implementation using SeaORM
//!
//! Profiles and group memberships live in two tables. Every query helper is
//! generic over `ConnectionTrait` so the same code runs on the pool or inside
//! a transaction.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

// Re-export the main database interface
pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{DatabaseBackendType, DatabaseStats, TransactionGroupStore};
