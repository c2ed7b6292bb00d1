//! Profile service integration tests
//!
//! Full profile lifecycles: provisioning, completion, role changes and
//! account removal, with group membership checked after every step.

#[cfg(test)]
mod tests {
    use crate::common::{ActorFactory, ProfileFactory, TestDatabase, assert_groups};
    use pms_access::{AccessError, ProfileChanges, ProfileField, Role};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_provisioned_doctor_completes_profile() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let owner_id = Uuid::new_v4();

        let profile = service.provision(owner_id, Role::Doctor).await.unwrap();
        assert_eq!(
            profile.missing_fields(),
            vec![ProfileField::Department, ProfileField::LicenseNumber]
        );
        assert_groups(db.db(), owner_id, &["Doctors"]).await;

        let owner = pms_access::Actor::new(owner_id, Role::Doctor);
        let updated = service
            .update_profile(
                &owner,
                owner_id,
                ProfileChanges {
                    department: Some("Cardiology".to_string()),
                    ..ProfileChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.missing_fields(), vec![ProfileField::LicenseNumber]);

        let updated = service
            .update_profile(
                &owner,
                owner_id,
                ProfileChanges {
                    license_number: Some("MD-1234".to_string()),
                    ..ProfileChanges::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_complete());
        assert_groups(db.db(), owner_id, &["Doctors"]).await;
    }

    #[tokio::test]
    async fn test_nurse_promoted_to_doctor_moves_group() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let nurse = ProfileFactory::complete(Role::Nurse);
        let admin = ActorFactory::admin();

        service.create_profile(&admin, nurse.clone()).await.unwrap();
        assert_groups(db.db(), nurse.owner_id, &["Nurses"]).await;

        let promoted = service
            .update_profile(&admin, nurse.owner_id, ProfileChanges::role(Role::Doctor))
            .await
            .unwrap();

        assert_eq!(promoted.role, Role::Doctor);
        assert_groups(db.db(), nurse.owner_id, &["Doctors"]).await;
    }

    #[tokio::test]
    async fn test_role_change_keeps_non_role_groups() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let owner_id = Uuid::new_v4();

        service.provision(owner_id, Role::Patient).await.unwrap();
        pms_access::GroupStore::add_membership(db.db(), owner_id, "Ward 7 Rota")
            .await
            .unwrap();

        service
            .update_profile(
                &ActorFactory::superuser(),
                owner_id,
                ProfileChanges::role(Role::Pharmacy),
            )
            .await
            .unwrap();

        assert_groups(db.db(), owner_id, &["Pharmacy", "Ward 7 Rota"]).await;
    }

    #[tokio::test]
    async fn test_setting_same_role_is_not_a_role_change() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let nurse = ProfileFactory::complete(Role::Nurse);
        service.provision(nurse.owner_id, Role::Nurse).await.unwrap();

        let owner = ActorFactory::owner_of(&nurse);
        let result = service
            .update_profile(&owner, nurse.owner_id, ProfileChanges::role(Role::Nurse))
            .await;

        assert!(result.is_ok());
        assert_groups(db.db(), nurse.owner_id, &["Nurses"]).await;
    }

    #[tokio::test]
    async fn test_denied_update_leaves_profile_untouched() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let patient = service.provision(Uuid::new_v4(), Role::Patient).await.unwrap();
        let other_patient = ActorFactory::with_role(Role::Patient);

        let err = service
            .update_profile(
                &other_patient,
                patient.owner_id,
                ProfileChanges {
                    phone: Some("555-0199".to_string()),
                    ..ProfileChanges::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccessError::PermissionDenied));
        let stored = db.db().find_profile(patient.owner_id).await.unwrap().unwrap();
        assert!(stored.phone.is_none());
    }

    #[tokio::test]
    async fn test_staff_see_patients_and_themselves() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let admin = ActorFactory::admin();

        let mut patients = Vec::new();
        for _ in 0..3 {
            let patient = ProfileFactory::complete(Role::Patient);
            service.create_profile(&admin, patient.clone()).await.unwrap();
            patients.push(patient.owner_id);
        }
        let nurse = ProfileFactory::complete(Role::Nurse);
        let doctor = ProfileFactory::complete(Role::Doctor);
        service.create_profile(&admin, nurse.clone()).await.unwrap();
        service.create_profile(&admin, doctor.clone()).await.unwrap();

        let visible = service
            .list_visible(&ActorFactory::owner_of(&nurse))
            .await
            .unwrap();
        let mut ids: Vec<Uuid> = visible.iter().map(|p| p.owner_id).collect();
        ids.sort();
        let mut expected = patients.clone();
        expected.push(nurse.owner_id);
        expected.sort();
        assert_eq!(ids, expected);

        let err = service
            .get_profile(&ActorFactory::owner_of(&nurse), doctor.owner_id)
            .await
            .unwrap_err();
        assert!(err.is_permission_denied());

        let everything = service.list_visible(&admin).await.unwrap();
        assert_eq!(everything.len(), 5);
    }

    #[tokio::test]
    async fn test_removed_account_leaves_nothing_behind() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let owner_id = Uuid::new_v4();

        service.provision(owner_id, Role::Doctor).await.unwrap();
        pms_access::GroupStore::add_membership(db.db(), owner_id, "On Call")
            .await
            .unwrap();

        assert!(service.remove_account(owner_id).await.unwrap());
        assert!(db.db().find_profile(owner_id).await.unwrap().is_none());
        assert_groups(db.db(), owner_id, &[]).await;

        assert!(!service.remove_account(owner_id).await.unwrap());

        // The account id can be provisioned again afterwards
        service.provision(owner_id, Role::Patient).await.unwrap();
        assert_groups(db.db(), owner_id, &["Patients"]).await;
    }

    #[tokio::test]
    async fn test_concurrent_changes_to_different_owners() {
        let db = TestDatabase::new().await;
        let service = db.service();
        let admin = ActorFactory::admin();

        let mut owners = Vec::new();
        for _ in 0..6 {
            let owner_id = Uuid::new_v4();
            service.provision(owner_id, Role::Nurse).await.unwrap();
            owners.push(owner_id);
        }

        let handles: Vec<_> = owners
            .iter()
            .enumerate()
            .map(|(i, &owner_id)| {
                let service = service.clone();
                let admin = admin.clone();
                let role = if i % 2 == 0 { Role::Doctor } else { Role::Pharmacy };
                tokio::spawn(async move {
                    service
                        .update_profile(&admin, owner_id, ProfileChanges::role(role))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for (i, owner_id) in owners.into_iter().enumerate() {
            let expected = if i % 2 == 0 { "Doctors" } else { "Pharmacy" };
            assert_groups(db.db(), owner_id, &[expected]).await;
        }
    }
}
