//! Group store abstraction
//!
//! Group membership is owned by the identity subsystem. The access engine
//! only asks for changes through this trait.

use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

/// External store of coarse-grained group memberships.
///
/// Every call may fail (network or storage errors). Adding a membership
/// that is already held and removing one that is not held both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Put the account in a group
    async fn add_membership(&self, account_id: Uuid, group: &str) -> Result<()>;

    /// Take the account out of a group
    async fn remove_membership(&self, account_id: Uuid, group: &str) -> Result<()>;

    /// Groups currently held by the account
    async fn memberships(&self, account_id: Uuid) -> Result<Vec<String>>;
}

/// Process-local group store
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    groups: DashMap<Uuid, BTreeSet<String>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn add_membership(&self, account_id: Uuid, group: &str) -> Result<()> {
        debug!(%account_id, group, "Adding in-memory group membership");
        self.groups
            .entry(account_id)
            .or_default()
            .insert(group.to_string());
        Ok(())
    }

    async fn remove_membership(&self, account_id: Uuid, group: &str) -> Result<()> {
        debug!(%account_id, group, "Removing in-memory group membership");
        if let Some(mut groups) = self.groups.get_mut(&account_id) {
            groups.remove(group);
        }
        Ok(())
    }

    async fn memberships(&self, account_id: Uuid) -> Result<Vec<String>> {
        Ok(self
            .groups
            .get(&account_id)
            .map(|groups| groups.iter().cloned().collect())
            .unwrap_or_default())
    }
}
