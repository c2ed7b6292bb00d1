//! Main profile service implementation

use crate::auth::actor::Actor;
use crate::auth::groups::{GroupSynchronizer, SyncOutcome};
use crate::auth::rbac::{Operation, PermissionEvaluator, Role, VisibilityFilter};
use crate::core::models::profile::{Profile, ProfileChanges};
use crate::storage::database::seaorm_db::{group_ops, profile_ops};
use crate::storage::{Database, TransactionGroupStore};
use crate::utils::error::{AccessError, Result};
use dashmap::DashMap;
use sea_orm::DatabaseTransaction;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Profile lifecycle service
#[derive(Debug, Clone)]
pub struct ProfileService {
    database: Arc<Database>,
    synchronizer: GroupSynchronizer,
    /// One in-flight mutation per profile owner
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(database: Arc<Database>, synchronizer: GroupSynchronizer) -> Self {
        Self {
            database,
            synchronizer,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn synchronizer(&self) -> &GroupSynchronizer {
        &self.synchronizer
    }

    /// Create the profile for a freshly created account.
    ///
    /// Runs on behalf of the identity subsystem, so no actor is checked.
    /// Fails with `DuplicateProfile` if the account already has one.
    pub async fn provision(&self, owner_id: Uuid, role: Role) -> Result<Profile> {
        self.insert_with_groups(Profile::new(owner_id, role)).await
    }

    /// Create a fully populated profile on an actor's behalf
    pub async fn create_profile(&self, actor: &Actor, profile: Profile) -> Result<Profile> {
        PermissionEvaluator::authorize(actor, Operation::Add, Some(&profile)).into_result()?;
        self.insert_with_groups(profile).await
    }

    /// Fetch a single profile the actor may view.
    ///
    /// Only admins and superusers can tell a missing profile from one they
    /// may not see; everyone else gets `PermissionDenied` for both.
    pub async fn get_profile(&self, actor: &Actor, owner_id: Uuid) -> Result<Profile> {
        let found = self.database.find_profile(owner_id).await?;
        authorize_target(actor, Operation::View, owner_id, found)
    }

    /// Every profile the actor may see
    pub async fn list_visible(&self, actor: &Actor) -> Result<Vec<Profile>> {
        PermissionEvaluator::authorize_collection(actor, Operation::View).into_result()?;

        let scope = VisibilityFilter::scope(actor);
        let profiles = self.database.list_profiles(scope).await?;
        debug!(actor_id = %actor.id, count = profiles.len(), "Listed visible profiles");
        Ok(profiles)
    }

    /// Apply changes to a profile.
    ///
    /// A role change re-syncs groups in the same transaction; if the sync
    /// fails the role write is rolled back and the failure is returned.
    pub async fn update_profile(
        &self,
        actor: &Actor,
        owner_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Profile> {
        let _guard = self.lock_owner(owner_id).await;

        let txn = self.database.begin().await?;
        let result = self.update_in(&txn, actor, owner_id, changes).await;
        finish(txn, owner_id, result).await
    }

    /// Delete a profile and its group memberships
    pub async fn delete_profile(&self, actor: &Actor, owner_id: Uuid) -> Result<()> {
        let _guard = self.lock_owner(owner_id).await;

        let txn = self.database.begin().await?;
        let result = delete_in(&txn, actor, owner_id).await;
        finish(txn, owner_id, result).await?;

        info!(%owner_id, "Profile deleted");
        Ok(())
    }

    /// Cascade for a deleted account: drop its profile and every group
    /// membership. Returns whether a profile existed.
    pub async fn remove_account(&self, owner_id: Uuid) -> Result<bool> {
        let _guard = self.lock_owner(owner_id).await;

        let txn = self.database.begin().await?;
        let result = remove_account_in(&txn, owner_id).await;
        let existed = finish(txn, owner_id, result).await?;

        info!(%owner_id, existed, "Account removed");
        Ok(existed)
    }

    /// Reconcile an account's groups with its stored role, healing drift.
    /// This is also the retry entry point after a `GroupSync` failure.
    pub async fn resync_groups(&self, owner_id: Uuid) -> Result<SyncOutcome> {
        let _guard = self.lock_owner(owner_id).await;

        let txn = self.database.begin().await?;
        let result = self.resync_in(&txn, owner_id).await;
        finish(txn, owner_id, result).await
    }

    async fn insert_with_groups(&self, profile: Profile) -> Result<Profile> {
        let owner_id = profile.owner_id;
        let _guard = self.lock_owner(owner_id).await;

        let txn = self.database.begin().await?;
        let result = self.insert_in(&txn, &profile).await;
        finish(txn, owner_id, result).await?;

        info!(
            %owner_id,
            role = %profile.role,
            complete = profile.is_complete(),
            "Profile created"
        );
        Ok(profile)
    }

    async fn insert_in(&self, txn: &DatabaseTransaction, profile: &Profile) -> Result<()> {
        profile_ops::insert_profile(txn, profile).await?;

        let store = TransactionGroupStore::new(txn);
        self.synchronizer.sync(&store, profile, None).await?;
        Ok(())
    }

    async fn update_in(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        owner_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Profile> {
        let found = profile_ops::find_profile(txn, owner_id).await?;
        let mut profile = authorize_target(actor, Operation::Change, owner_id, found)?;
        if changes.role.is_some_and(|role| role != profile.role) {
            PermissionEvaluator::can_change_role(actor).into_result()?;
        }

        let previous_role = profile.apply(changes);
        profile_ops::update_profile(txn, &profile).await?;

        if let Some(previous) = previous_role {
            let store = TransactionGroupStore::new(txn);
            self.synchronizer
                .sync(&store, &profile, Some(previous))
                .await?;
            info!(%owner_id, from = %previous, to = %profile.role, "Profile role changed");
        }

        Ok(profile)
    }

    async fn resync_in(&self, txn: &DatabaseTransaction, owner_id: Uuid) -> Result<SyncOutcome> {
        let profile = profile_ops::find_profile(txn, owner_id)
            .await?
            .ok_or_else(|| profile_not_found(owner_id))?;

        let store = TransactionGroupStore::new(txn);
        self.synchronizer
            .sync(&store, &profile, Some(profile.role))
            .await
    }

    /// Wait for exclusive access to an owner's profile
    async fn lock_owner(&self, owner_id: Uuid) -> OwnerGuard {
        let lock = self.locks.entry(owner_id).or_default().clone();
        let guard = lock.lock_owned().await;

        OwnerGuard {
            owner_id,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Owners with a mutation in flight or waiting
    #[cfg(test)]
    pub(crate) fn locked_owner_count(&self) -> usize {
        self.locks.len()
    }
}

/// Holds an owner's mutex. On drop the map entry is evicted once no other
/// task holds or waits on it.
struct OwnerGuard {
    owner_id: Uuid,
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OwnerGuard {
    fn drop(&mut self) {
        // Release our handle on the mutex before checking for other holders
        self.guard.take();
        self.locks
            .remove_if(&self.owner_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Resolve a looked-up profile into one the actor may act on.
///
/// A missing profile is only reported as such to admins and superusers.
fn authorize_target(
    actor: &Actor,
    operation: Operation,
    owner_id: Uuid,
    found: Option<Profile>,
) -> Result<Profile> {
    match found {
        Some(profile) => {
            PermissionEvaluator::authorize(actor, operation, Some(&profile)).into_result()?;
            Ok(profile)
        }
        None if actor.is_admin() => Err(profile_not_found(owner_id)),
        None => {
            debug!(actor_id = %actor.id, %owner_id, ?operation, "Denied access to unknown profile");
            Err(AccessError::PermissionDenied)
        }
    }
}

async fn delete_in(txn: &DatabaseTransaction, actor: &Actor, owner_id: Uuid) -> Result<()> {
    let found = profile_ops::find_profile(txn, owner_id).await?;
    authorize_target(actor, Operation::Delete, owner_id, found)?;

    profile_ops::delete_profile(txn, owner_id).await?;
    group_ops::clear_memberships(txn, owner_id).await?;
    Ok(())
}

async fn remove_account_in(txn: &DatabaseTransaction, owner_id: Uuid) -> Result<bool> {
    let existed = profile_ops::delete_profile(txn, owner_id).await?;
    let memberships = group_ops::clear_memberships(txn, owner_id).await?;
    debug!(%owner_id, memberships, "Cleared account memberships");
    Ok(existed)
}

/// Commit on success, roll back on error
async fn finish<T>(txn: DatabaseTransaction, owner_id: Uuid, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if !e.is_permission_denied() {
                warn!(%owner_id, error = %e, "Rolling back profile transaction");
            }
            if let Err(rollback) = txn.rollback().await {
                warn!(%owner_id, error = %rollback, "Rollback failed");
            }
            Err(e)
        }
    }
}

fn profile_not_found(owner_id: Uuid) -> AccessError {
    AccessError::not_found(format!("Profile for account {}", owner_id))
}
