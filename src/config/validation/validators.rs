//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for AccessConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating access configuration");

        self.storage.validate()?;
        self.group_sync.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        let supported = ["sqlite:", "postgresql://", "postgres://"];
        if !supported.iter().any(|prefix| self.url.starts_with(prefix)) {
            return Err("Only SQLite and PostgreSQL databases are supported".to_string());
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.max_connections > 1000 {
            return Err("Database max connections should not exceed 1000".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for GroupSyncConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Group sync max attempts must be at least 1".to_string());
        }

        if self.max_attempts > 20 {
            return Err("Group sync max attempts should not exceed 20".to_string());
        }

        if self.retry_backoff_ms > 60_000 {
            return Err("Group sync retry backoff should not exceed 60 seconds".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        Ok(())
    }
}
