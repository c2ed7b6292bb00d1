use crate::auth::groups::GroupStore;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, group_membership};
use super::types::SeaOrmDatabase;

/// Group store bound to an open transaction. Memberships written through it
/// commit or roll back together with the rest of the transaction.
pub struct TransactionGroupStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionGroupStore<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl GroupStore for SeaOrmDatabase {
    async fn add_membership(&self, account_id: Uuid, group: &str) -> Result<()> {
        add_membership(&self.db, account_id, group).await
    }

    async fn remove_membership(&self, account_id: Uuid, group: &str) -> Result<()> {
        remove_membership(&self.db, account_id, group).await
    }

    async fn memberships(&self, account_id: Uuid) -> Result<Vec<String>> {
        memberships(&self.db, account_id).await
    }
}

#[async_trait]
impl<'a> GroupStore for TransactionGroupStore<'a> {
    async fn add_membership(&self, account_id: Uuid, group: &str) -> Result<()> {
        add_membership(self.txn, account_id, group).await
    }

    async fn remove_membership(&self, account_id: Uuid, group: &str) -> Result<()> {
        remove_membership(self.txn, account_id, group).await
    }

    async fn memberships(&self, account_id: Uuid) -> Result<Vec<String>> {
        memberships(self.txn, account_id).await
    }
}

impl SeaOrmDatabase {
    /// Remove every membership an account holds
    pub async fn clear_memberships(&self, account_id: Uuid) -> Result<u64> {
        clear_memberships(&self.db, account_id).await
    }
}

async fn add_membership<C: ConnectionTrait>(conn: &C, account_id: Uuid, group: &str) -> Result<()> {
    debug!("Adding account {} to group {}", account_id, group);

    let active_model = group_membership::ActiveModel {
        id: NotSet,
        account_id: Set(account_id),
        group_name: Set(group.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };

    entities::GroupMembership::insert(active_model)
        .on_conflict(
            OnConflict::columns([
                group_membership::Column::AccountId,
                group_membership::Column::GroupName,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|e| store_error("add membership", e))?;

    Ok(())
}

async fn remove_membership<C: ConnectionTrait>(
    conn: &C,
    account_id: Uuid,
    group: &str,
) -> Result<()> {
    debug!("Removing account {} from group {}", account_id, group);

    entities::GroupMembership::delete_many()
        .filter(group_membership::Column::AccountId.eq(account_id))
        .filter(group_membership::Column::GroupName.eq(group))
        .exec(conn)
        .await
        .map_err(|e| store_error("remove membership", e))?;

    Ok(())
}

async fn memberships<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<Vec<String>> {
    let models = entities::GroupMembership::find()
        .filter(group_membership::Column::AccountId.eq(account_id))
        .order_by_asc(group_membership::Column::GroupName)
        .all(conn)
        .await
        .map_err(|e| store_error("list memberships", e))?;

    Ok(models.into_iter().map(|m| m.group_name).collect())
}

pub(crate) async fn clear_memberships<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<u64> {
    debug!("Clearing group memberships for account {}", account_id);

    let result = entities::GroupMembership::delete_many()
        .filter(group_membership::Column::AccountId.eq(account_id))
        .exec(conn)
        .await
        .map_err(|e| store_error("clear memberships", e))?;

    Ok(result.rows_affected)
}

fn store_error(operation: &str, e: DbErr) -> AccessError {
    AccessError::group_store(format!("Failed to {}: {}", operation, e))
}
