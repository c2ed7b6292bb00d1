//! Group synchronization integration tests
//!
//! Synchronizer, reconciler and access report running against database
//! backed group memberships.

#[cfg(test)]
mod tests {
    use crate::common::{ActorFactory, ProfileFactory, TestDatabase, assert_groups};
    use pms_access::services::ReconcileStatus;
    use pms_access::{
        AccessReport, GroupReconciler, GroupStore, ProfileChanges, Role, RoleCatalog,
    };
    use uuid::Uuid;

    #[tokio::test]
    async fn test_role_change_sequence_against_database() {
        let db = TestDatabase::new().await;
        let sync = TestDatabase::synchronizer();
        let account_id = Uuid::new_v4();

        sync.sync_account(db.db(), account_id, Role::Nurse, None)
            .await
            .unwrap();
        assert_groups(db.db(), account_id, &["Nurses"]).await;

        let outcome = sync
            .sync_account(db.db(), account_id, Role::Doctor, Some(Role::Nurse))
            .await
            .unwrap();
        assert_eq!(outcome.removed, vec!["Nurses"]);
        assert_groups(db.db(), account_id, &["Doctors"]).await;

        let outcome = sync
            .sync_account(db.db(), account_id, Role::Doctor, Some(Role::Doctor))
            .await
            .unwrap();
        assert!(outcome.is_noop());
    }

    #[tokio::test]
    async fn test_resync_heals_manual_group_edits() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let owner_id = Uuid::new_v4();
        service.provision(owner_id, Role::Pharmacy).await.unwrap();

        db.db().remove_membership(owner_id, "Pharmacy").await.unwrap();
        db.db().add_membership(owner_id, "Administrators").await.unwrap();

        let outcome = service.resync_groups(owner_id).await.unwrap();

        assert!(outcome.added);
        assert_eq!(outcome.removed, vec!["Administrators"]);
        assert_groups(db.db(), owner_id, &["Pharmacy"]).await;
    }

    async fn drifted_database() -> (TestDatabase, Uuid, Uuid) {
        let db = TestDatabase::new().await;
        let service = db.service();

        let consistent = Uuid::new_v4();
        service.provision(consistent, Role::Patient).await.unwrap();

        let drifted = Uuid::new_v4();
        service.provision(drifted, Role::Doctor).await.unwrap();
        db.db().add_membership(drifted, "Nurses").await.unwrap();

        (db, consistent, drifted)
    }

    #[tokio::test]
    async fn test_reconcile_dry_run_changes_nothing() {
        let (db, consistent, drifted) = drifted_database().await;
        let reconciler = GroupReconciler::new(db.service());

        let report = reconciler.run(true).await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.entries.len(), 2);
        let drifted_entries: Vec<_> = report.drifted().collect();
        assert_eq!(drifted_entries.len(), 1);
        assert_eq!(drifted_entries[0].account_id, drifted);
        assert_eq!(drifted_entries[0].stale_groups, vec!["Nurses"]);
        assert_eq!(drifted_entries[0].status, ReconcileStatus::WouldFix);
        assert_eq!(report.fixed_count(), 0);

        assert_groups(db.db(), drifted, &["Doctors", "Nurses"]).await;
        assert_groups(db.db(), consistent, &["Patients"]).await;
    }

    #[tokio::test]
    async fn test_reconcile_repairs_drift() {
        let (db, consistent, drifted) = drifted_database().await;
        let reconciler = GroupReconciler::new(db.service());

        let report = reconciler.run(false).await.unwrap();

        assert_eq!(report.fixed_count(), 1);
        assert_eq!(report.failed_count(), 0);
        assert_groups(db.db(), drifted, &["Doctors"]).await;
        assert_groups(db.db(), consistent, &["Patients"]).await;

        let second = reconciler.run(false).await.unwrap();
        assert_eq!(second.drifted().count(), 0);
        assert!(
            second
                .entries
                .iter()
                .all(|e| e.status == ReconcileStatus::Consistent)
        );
    }

    #[tokio::test]
    async fn test_reconcile_adds_missing_role_group() {
        let db = TestDatabase::new().await;
        let profile = ProfileFactory::complete(Role::Admin);
        db.db().insert_profile(&profile).await.unwrap();

        let report = GroupReconciler::new(db.service())
            .run(false)
            .await
            .unwrap();

        assert_eq!(report.fixed_count(), 1);
        assert_groups(db.db(), profile.owner_id, &["Administrators"]).await;
    }

    #[tokio::test]
    async fn test_access_report_from_database() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let admin = ActorFactory::admin();

        let doctor = ProfileFactory::complete(Role::Doctor);
        service.create_profile(&admin, doctor.clone()).await.unwrap();
        let nurse_id = Uuid::new_v4();
        service.provision(nurse_id, Role::Nurse).await.unwrap();
        service
            .update_profile(&admin, nurse_id, ProfileChanges::role(Role::Doctor))
            .await
            .unwrap();

        let report = AccessReport::build(db.db()).await.unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.role_counts.get(&Role::Doctor), Some(&2));
        assert_eq!(report.incomplete().count(), 1);
        for entry in &report.entries {
            assert_eq!(entry.groups, vec![RoleCatalog::group_name_of(Role::Doctor)]);
            assert!(!entry.group_drift);
            assert!(entry.capabilities.can_prescribe_medication);
        }

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["entries"].as_array().map(Vec::len), Some(2));
        assert!(report.to_string().contains("Total profiles: 2"));
    }
}
