//! Role to group synchronization
//!
//! Keeps an account's role-group membership equal to `{group(role)}`.
//! Group names that do not mirror a role are left alone.

use super::store::GroupStore;
use crate::auth::rbac::{Role, RoleCatalog};
use crate::config::GroupSyncConfig;
use crate::core::models::profile::Profile;
use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// What a successful sync changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub account_id: Uuid,
    /// Group the account now holds
    pub group: String,
    /// Whether the target group had to be added
    pub added: bool,
    /// Role groups that were removed
    pub removed: Vec<String>,
}

impl SyncOutcome {
    /// Membership was already consistent
    pub fn is_noop(&self) -> bool {
        !self.added && self.removed.is_empty()
    }
}

/// Partial state left behind by a failed sync.
///
/// Calling `sync` again with the same arguments resumes from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSyncFailure {
    pub account_id: Uuid,
    /// Group the account should end up in
    pub target_group: String,
    /// Role groups removed before the failure
    pub removed: Vec<String>,
    /// Role groups that still had to be removed
    pub pending_removals: Vec<String>,
    /// Whether the target group was added
    pub added: bool,
    /// Underlying store error
    pub cause: String,
}

/// Reconciles group membership with a profile's role
#[derive(Debug, Clone, Default)]
pub struct GroupSynchronizer {
    config: GroupSyncConfig,
}

impl GroupSynchronizer {
    pub fn new(config: GroupSyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GroupSyncConfig {
        &self.config
    }

    /// Sync the profile owner's groups with `profile.role`.
    ///
    /// `previous_role` is `None` on first creation, in which case only the
    /// target group is added. Otherwise every other role group the account
    /// holds is removed as well.
    pub async fn sync<S: GroupStore + ?Sized>(
        &self,
        store: &S,
        profile: &Profile,
        previous_role: Option<Role>,
    ) -> Result<SyncOutcome> {
        self.sync_account(store, profile.owner_id, profile.role, previous_role)
            .await
    }

    /// Sync an account's groups with `role`
    pub async fn sync_account<S: GroupStore + ?Sized>(
        &self,
        store: &S,
        account_id: Uuid,
        role: Role,
        previous_role: Option<Role>,
    ) -> Result<SyncOutcome> {
        let target = RoleCatalog::group_name_of(role);
        let failure = |removed: Vec<String>, pending: Vec<String>, added: bool, e: AccessError| {
            GroupSyncFailure {
                account_id,
                target_group: target.to_string(),
                removed,
                pending_removals: pending,
                added,
                cause: e.to_string(),
            }
        };

        let held = self
            .with_retry("list memberships", move || store.memberships(account_id))
            .await
            .map_err(|e| self.report(failure(vec![], vec![], false, e)))?;

        let stale: Vec<String> = match previous_role {
            None => Vec::new(),
            Some(_) => held
                .iter()
                .filter(|group| group.as_str() != target && RoleCatalog::is_role_group(group))
                .cloned()
                .collect(),
        };

        let mut removed = Vec::with_capacity(stale.len());
        for group in &stale {
            let group_name = group.as_str();
            match self
                .with_retry("remove membership", move || {
                    store.remove_membership(account_id, group_name)
                })
                .await
            {
                Ok(()) => removed.push(group.clone()),
                Err(e) => {
                    let pending = stale[removed.len()..].to_vec();
                    return Err(self.report(failure(removed, pending, false, e)));
                }
            }
        }

        let added = !held.iter().any(|group| group == target);
        if added {
            self.with_retry("add membership", move || store.add_membership(account_id, target))
                .await
                .map_err(|e| self.report(failure(removed.clone(), vec![], false, e)))?;
        }

        let outcome = SyncOutcome {
            account_id,
            group: target.to_string(),
            added,
            removed,
        };

        if outcome.is_noop() {
            debug!(%account_id, group = target, "Group membership already consistent");
        } else {
            info!(
                %account_id,
                group = target,
                removed = ?outcome.removed,
                "Synchronized group membership"
            );
        }

        Ok(outcome)
    }

    /// Run a store call, retrying retryable errors up to `max_attempts`
    async fn with_retry<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Group store call failed, retrying"
                    );
                    tokio::time::sleep(self.config.backoff_for(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn report(&self, failure: GroupSyncFailure) -> AccessError {
        error!(
            account_id = %failure.account_id,
            target_group = %failure.target_group,
            removed = ?failure.removed,
            pending_removals = ?failure.pending_removals,
            cause = %failure.cause,
            "Group synchronization failed"
        );
        failure.into()
    }
}
