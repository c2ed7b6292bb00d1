//! Configuration management
//!
//! This module handles loading, validation, and management of all configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AccessError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Access engine configuration
    pub access: AccessConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AccessError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let access: AccessConfig = serde_yaml::from_str(content)
            .map_err(|e| AccessError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { access };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut access = AccessConfig::default();

        if let Some(url) = env_var("PMS_DATABASE_URL") {
            access.storage.database.url = url;
        }
        if let Some(value) = env_var("PMS_DATABASE_MAX_CONNECTIONS") {
            access.storage.database.max_connections = parse_env("PMS_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = env_var("PMS_GROUP_SYNC_MAX_ATTEMPTS") {
            access.group_sync.max_attempts = parse_env("PMS_GROUP_SYNC_MAX_ATTEMPTS", &value)?;
        }
        if let Some(value) = env_var("PMS_GROUP_SYNC_BACKOFF_MS") {
            access.group_sync.retry_backoff_ms = parse_env("PMS_GROUP_SYNC_BACKOFF_MS", &value)?;
        }
        if let Some(level) = env_var("PMS_LOG_LEVEL") {
            access.logging.level = level;
        }
        if let Some(format) = env_var("PMS_LOG_FORMAT") {
            access.logging.format = format.parse().map_err(AccessError::Config)?;
        }

        let config = Self { access };
        config.validate()?;
        Ok(config)
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.access.storage
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.access.storage.database
    }

    /// Get group sync configuration
    pub fn group_sync(&self) -> &GroupSyncConfig {
        &self.access.group_sync
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.access.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.access
            .storage
            .validate()
            .map_err(|e| AccessError::Config(format!("Storage config error: {}", e)))?;

        self.access
            .group_sync
            .validate()
            .map_err(|e| AccessError::Config(format!("Group sync config error: {}", e)))?;

        self.access
            .logging
            .validate()
            .map_err(|e| AccessError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.access)
            .map_err(|e| AccessError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AccessError::Config(format!("Invalid value for {}: {}", key, value)))
}
