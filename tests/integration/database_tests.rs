//! Database integration tests
//!
//! Profile storage, visibility queries and membership rows against
//! in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::common::{ActorFactory, ProfileFactory, TestDatabase, assert_groups};
    use pms_access::config::DatabaseConfig;
    use pms_access::storage::{Database, DatabaseBackendType};
    use pms_access::{AccessError, GroupStore, Role, VisibilityFilter, VisibilityScope};
    use sea_orm::ConnectionTrait;
    use std::collections::HashSet;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_health_check_and_empty_stats() {
        let db = TestDatabase::new().await;

        assert!(db.db().health_check().await.is_ok());
        let stats = db.db().stats().await.unwrap();
        assert_eq!(stats.profiles, 0);
        assert_eq!(stats.group_memberships, 0);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        assert!(db.db().migrate().await.is_ok());
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let db = TestDatabase::new().await;
        let profile = ProfileFactory::complete(Role::Doctor);

        crate::assert_ok!(db.db().insert_profile(&profile).await);
        let stored = db.db().find_profile(profile.owner_id).await.unwrap().unwrap();

        assert_eq!(stored.owner_id, profile.owner_id);
        assert_eq!(stored.role, Role::Doctor);
        assert_eq!(stored.department, profile.department);
        assert_eq!(stored.license_number, profile.license_number);
        assert!(stored.phone.is_none());
    }

    #[tokio::test]
    async fn test_second_profile_for_account_is_rejected() {
        let db = TestDatabase::new().await;
        let profile = ProfileFactory::bare(Role::Patient);
        db.db().insert_profile(&profile).await.unwrap();

        let duplicate = pms_access::Profile::new(profile.owner_id, Role::Nurse);
        let err = crate::assert_err!(db.db().insert_profile(&duplicate).await);

        assert!(matches!(err, AccessError::DuplicateProfile(id) if id == profile.owner_id));
        let stored = db.db().find_profile(profile.owner_id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Patient);
    }

    #[tokio::test]
    async fn test_update_and_delete_profile() {
        let db = TestDatabase::new().await;
        let mut profile = ProfileFactory::bare(Role::Nurse);
        db.db().insert_profile(&profile).await.unwrap();

        profile.department = Some("Oncology".to_string());
        db.db().update_profile(&profile).await.unwrap();
        let stored = db.db().find_profile(profile.owner_id).await.unwrap().unwrap();
        assert_eq!(stored.department.as_deref(), Some("Oncology"));

        assert!(db.db().delete_profile(profile.owner_id).await.unwrap());
        assert!(!db.db().delete_profile(profile.owner_id).await.unwrap());
        assert!(db.db().find_profile(profile.owner_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scoped_listing_matches_in_memory_filter() {
        let db = TestDatabase::new().await;
        let profiles = ProfileFactory::mixed(15);
        for profile in &profiles {
            db.db().insert_profile(profile).await.unwrap();
        }

        let mut actors = vec![ActorFactory::admin(), ActorFactory::superuser()];
        actors.extend(profiles.iter().take(5).map(ActorFactory::owner_of));
        actors.push(ActorFactory::with_role(Role::Doctor));

        for actor in actors {
            let scope = VisibilityFilter::scope(&actor);
            let from_db: HashSet<Uuid> = db
                .db()
                .list_profiles(scope)
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.owner_id)
                .collect();
            let in_memory: HashSet<Uuid> = VisibilityFilter::visible_records(&actor, &profiles)
                .into_iter()
                .map(|p| p.owner_id)
                .collect();

            assert_eq!(from_db, in_memory, "actor {:?}", actor);
        }
    }

    #[tokio::test]
    async fn test_nothing_scope_lists_nothing() {
        let db = TestDatabase::new().await;
        db.db()
            .insert_profile(&ProfileFactory::bare(Role::Patient))
            .await
            .unwrap();

        let listed = db.db().list_profiles(VisibilityScope::Nothing).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_membership_rows_are_unique() {
        let db = TestDatabase::new().await;
        let account_id = Uuid::new_v4();

        db.db().add_membership(account_id, "Nurses").await.unwrap();
        db.db().add_membership(account_id, "Nurses").await.unwrap();
        db.db().add_membership(account_id, "Ward 7 Rota").await.unwrap();

        assert_groups(db.db(), account_id, &["Nurses", "Ward 7 Rota"]).await;
        assert_eq!(db.db().stats().await.unwrap().group_memberships, 2);
    }

    #[tokio::test]
    async fn test_removing_absent_membership_is_ok() {
        let db = TestDatabase::new().await;
        let account_id = Uuid::new_v4();

        assert!(db.db().remove_membership(account_id, "Doctors").await.is_ok());

        db.db().add_membership(account_id, "Doctors").await.unwrap();
        db.db().remove_membership(account_id, "Doctors").await.unwrap();
        assert_groups(db.db(), account_id, &[]).await;
    }

    #[tokio::test]
    async fn test_clear_memberships_only_touches_one_account() {
        let db = TestDatabase::new().await;
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        db.db().add_membership(first, "Patients").await.unwrap();
        db.db().add_membership(first, "Ward 7 Rota").await.unwrap();
        db.db().add_membership(second, "Patients").await.unwrap();

        assert_eq!(db.db().clear_memberships(first).await.unwrap(), 2);
        assert_groups(db.db(), first, &[]).await;
        assert_groups(db.db(), second, &["Patients"]).await;
    }

    #[tokio::test]
    async fn test_membership_failures_are_group_store_errors() {
        let db = TestDatabase::new().await;
        db.db()
            .connection()
            .execute_unprepared("DROP TABLE group_memberships")
            .await
            .unwrap();

        let err = db.db().memberships(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AccessError::GroupStore(_)));
        assert!(err.to_string().contains("Failed to list memberships"));
        assert!(err.is_retryable());

        let err = db
            .db()
            .add_membership(Uuid::new_v4(), "Doctors")
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::GroupStore(_)));
    }

    #[tokio::test]
    async fn test_close_connection() {
        let db = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
        assert_eq!(db.backend_type(), DatabaseBackendType::SQLite);
        assert!(db.close().await.is_ok());
    }
}
