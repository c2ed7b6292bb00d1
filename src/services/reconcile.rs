//! Group drift reconciliation
//!
//! Walks every stored profile and checks that the account holds exactly its
//! role group. In dry-run mode nothing is written. Repairs go through
//! [`ProfileService::resync_groups`], so they take the owner's lock and
//! re-read the stored role inside a transaction.

use super::profile::ProfileService;
use crate::auth::groups::GroupStore;
use crate::auth::rbac::{Role, RoleCatalog, VisibilityScope};
use crate::core::models::profile::Profile;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Per-account reconciliation status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileStatus {
    /// Already held exactly the role group
    Consistent,
    /// Drifted; left untouched because of dry-run
    WouldFix,
    /// Drifted and repaired
    Fixed,
    /// Memberships could not be read or the repair failed
    Failed(String),
}

/// Reconciliation result for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileEntry {
    pub account_id: Uuid,
    pub role: Role,
    pub expected_group: String,
    /// Groups held before reconciliation
    pub current_groups: Vec<String>,
    /// Role groups other than the expected one
    pub stale_groups: Vec<String>,
    pub status: ReconcileStatus,
}

impl ReconcileEntry {
    pub fn is_drifted(&self) -> bool {
        self.status != ReconcileStatus::Consistent
    }
}

/// Result of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub dry_run: bool,
    pub entries: Vec<ReconcileEntry>,
}

impl ReconcileReport {
    pub fn drifted(&self) -> impl Iterator<Item = &ReconcileEntry> {
        self.entries.iter().filter(|e| e.is_drifted())
    }

    pub fn fixed_count(&self) -> usize {
        self.count(|s| matches!(s, ReconcileStatus::Fixed))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, ReconcileStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ReconcileStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }
}

/// Finds and repairs group drift across all profiles
#[derive(Debug, Clone)]
pub struct GroupReconciler {
    service: ProfileService,
}

impl GroupReconciler {
    /// Reconciler sharing the service's per-owner locks
    pub fn new(service: ProfileService) -> Self {
        Self { service }
    }

    /// Check every profile, repairing drift unless `dry_run` is set.
    ///
    /// A failed check or repair is recorded and the run continues with the
    /// next account.
    pub async fn run(&self, dry_run: bool) -> Result<ReconcileReport> {
        if dry_run {
            warn!("Dry run: group memberships will not be changed");
        }

        let profiles = self
            .service
            .database()
            .list_profiles(VisibilityScope::All)
            .await?;

        let mut entries = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            entries.push(self.reconcile_profile(profile, dry_run).await);
        }

        let report = ReconcileReport { dry_run, entries };
        info!(
            checked = report.entries.len(),
            drifted = report.drifted().count(),
            fixed = report.fixed_count(),
            failed = report.failed_count(),
            "Group reconciliation finished"
        );
        Ok(report)
    }

    /// Check one listed profile. The listing may be stale by the time a
    /// repair runs; the repair itself always uses the stored role.
    async fn reconcile_profile(&self, profile: &Profile, dry_run: bool) -> ReconcileEntry {
        let account_id = profile.owner_id;
        let mut entry = ReconcileEntry {
            account_id,
            role: profile.role,
            expected_group: RoleCatalog::group_name_of(profile.role).to_string(),
            current_groups: Vec::new(),
            stale_groups: Vec::new(),
            status: ReconcileStatus::Consistent,
        };

        match self.service.database().memberships(account_id).await {
            Ok(groups) => entry.current_groups = groups,
            Err(e) => {
                error!(%account_id, error = %e, "Failed to read group memberships");
                entry.status = ReconcileStatus::Failed(e.to_string());
                return entry;
            }
        }

        entry.stale_groups = entry
            .current_groups
            .iter()
            .filter(|g| **g != entry.expected_group && RoleCatalog::is_role_group(g))
            .cloned()
            .collect();
        let drifted = !entry.stale_groups.is_empty()
            || !entry.current_groups.contains(&entry.expected_group);

        if !drifted {
            return entry;
        }

        if dry_run {
            info!(
                %account_id,
                role = %profile.role,
                groups = ?entry.current_groups,
                expected = %entry.expected_group,
                "Would fix group assignment"
            );
            entry.status = ReconcileStatus::WouldFix;
            return entry;
        }

        entry.status = match self.service.resync_groups(account_id).await {
            Ok(outcome) => {
                if outcome.group != entry.expected_group {
                    // Role changed after the listing
                    if let Some(role) = RoleCatalog::role_of_group(&outcome.group) {
                        entry.role = role;
                    }
                    entry.expected_group = outcome.group.clone();
                }
                if outcome.is_noop() {
                    ReconcileStatus::Consistent
                } else {
                    ReconcileStatus::Fixed
                }
            }
            Err(e) => {
                error!(%account_id, error = %e, "Failed to fix group assignment");
                ReconcileStatus::Failed(e.to_string())
            }
        };
        entry
    }
}
