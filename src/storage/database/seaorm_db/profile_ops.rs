use crate::auth::rbac::{Role, VisibilityScope};
use crate::core::models::profile::Profile;
use crate::utils::error::{AccessError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, profile};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find the profile owned by an account
    pub async fn find_profile(&self, owner_id: Uuid) -> Result<Option<Profile>> {
        find_profile(&self.db, owner_id).await
    }

    /// Insert a new profile
    pub async fn insert_profile(&self, profile: &Profile) -> Result<()> {
        insert_profile(&self.db, profile).await
    }

    /// Overwrite a stored profile
    pub async fn update_profile(&self, profile: &Profile) -> Result<()> {
        update_profile(&self.db, profile).await
    }

    /// Delete a profile, returning whether a row was removed
    pub async fn delete_profile(&self, owner_id: Uuid) -> Result<bool> {
        delete_profile(&self.db, owner_id).await
    }

    /// List profiles inside a visibility scope
    pub async fn list_profiles(&self, scope: VisibilityScope) -> Result<Vec<Profile>> {
        list_profiles(&self.db, scope).await
    }
}

pub(crate) async fn find_profile<C: ConnectionTrait>(
    conn: &C,
    owner_id: Uuid,
) -> Result<Option<Profile>> {
    debug!("Finding profile for account: {}", owner_id);

    let model = entities::Profile::find_by_id(owner_id)
        .one(conn)
        .await
        .map_err(AccessError::Database)?;

    model.map(|m| m.to_domain_profile()).transpose()
}

pub(crate) async fn insert_profile<C: ConnectionTrait>(conn: &C, profile: &Profile) -> Result<()> {
    debug!("Creating profile for account: {}", profile.owner_id);

    let active_model = profile::Model::from_domain_profile(profile);

    entities::Profile::insert(active_model)
        .exec_without_returning(conn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AccessError::DuplicateProfile(profile.owner_id)
            }
            _ => AccessError::Database(e),
        })?;

    Ok(())
}

pub(crate) async fn update_profile<C: ConnectionTrait>(conn: &C, profile: &Profile) -> Result<()> {
    debug!("Updating profile for account: {}", profile.owner_id);

    let result = entities::Profile::update_many()
        .set(profile::Model::from_domain_profile(profile))
        .filter(profile::Column::OwnerId.eq(profile.owner_id))
        .exec(conn)
        .await
        .map_err(AccessError::Database)?;

    if result.rows_affected == 0 {
        return Err(AccessError::not_found(format!(
            "Profile for account {}",
            profile.owner_id
        )));
    }

    Ok(())
}

pub(crate) async fn delete_profile<C: ConnectionTrait>(conn: &C, owner_id: Uuid) -> Result<bool> {
    debug!("Deleting profile for account: {}", owner_id);

    let result = entities::Profile::delete_by_id(owner_id)
        .exec(conn)
        .await
        .map_err(AccessError::Database)?;

    Ok(result.rows_affected > 0)
}

pub(crate) async fn list_profiles<C: ConnectionTrait>(
    conn: &C,
    scope: VisibilityScope,
) -> Result<Vec<Profile>> {
    debug!("Listing profiles in scope {:?}", scope);

    let Some(condition) = scope_condition(scope) else {
        return Ok(Vec::new());
    };

    let models = entities::Profile::find()
        .filter(condition)
        .order_by_asc(profile::Column::CreatedAt)
        .order_by_asc(profile::Column::OwnerId)
        .all(conn)
        .await
        .map_err(AccessError::Database)?;

    models.iter().map(profile::Model::to_domain_profile).collect()
}

/// SQL rendering of a visibility scope. `None` matches no rows.
fn scope_condition(scope: VisibilityScope) -> Option<Condition> {
    match scope {
        VisibilityScope::All => Some(Condition::all()),
        VisibilityScope::PatientsAndOwn(id) => Some(
            Condition::any()
                .add(profile::Column::Role.eq(Role::Patient.as_str()))
                .add(profile::Column::OwnerId.eq(id)),
        ),
        VisibilityScope::OwnOnly(id) => Some(Condition::all().add(profile::Column::OwnerId.eq(id))),
        VisibilityScope::Nothing => None,
    }
}
