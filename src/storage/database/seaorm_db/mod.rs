// Module declarations
mod connection;
pub(crate) mod group_ops;
pub(crate) mod profile_ops;
mod types;

// Re-export public types
pub use group_ops::TransactionGroupStore;
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
