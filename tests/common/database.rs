//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite database with migrations
//! applied.

use pms_access::config::{DatabaseConfig, GroupSyncConfig};
use pms_access::storage::Database;
use pms_access::{GroupSynchronizer, ProfileService};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    pub async fn new() -> Self {
        let db = Database::new(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }

    /// Profile service over this database, without retry delays
    pub fn service(&self) -> ProfileService {
        ProfileService::new(self.db_arc(), Self::synchronizer())
    }

    /// Synchronizer with fast retries
    pub fn synchronizer() -> GroupSynchronizer {
        GroupSynchronizer::new(GroupSyncConfig {
            max_attempts: 2,
            retry_backoff_ms: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }
}
