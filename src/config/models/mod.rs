//! Configuration data models
//!
//! This module defines all configuration structures used throughout the crate.

#![allow(missing_docs)]

pub mod group_sync;
pub mod logging;
pub mod storage;

pub use group_sync::*;
pub use logging::*;
pub use storage::*;

use serde::{Deserialize, Serialize};

/// Top-level configuration file layout
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccessConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Group synchronization configuration
    #[serde(default)]
    pub group_sync: GroupSyncConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default database URL
pub fn default_database_url() -> String {
    "sqlite://data/pms.db?mode=rwc".to_string()
}

/// Default maximum pooled connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default attempts per group store call
pub fn default_sync_max_attempts() -> u32 {
    3
}

/// Default delay between group store retries in milliseconds
pub fn default_sync_retry_backoff_ms() -> u64 {
    100
}

/// Default log filter directive
pub fn default_log_level() -> String {
    "info".to_string()
}
