//! Group synchronization configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for group store calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSyncConfig {
    /// Attempts per add/remove/list call, including the first
    #[serde(default = "default_sync_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_backoff_ms`
    #[serde(default = "default_sync_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for GroupSyncConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_sync_max_attempts(),
            retry_backoff_ms: default_sync_retry_backoff_ms(),
        }
    }
}

impl GroupSyncConfig {
    /// Single attempt, no waiting
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}
