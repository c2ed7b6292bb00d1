//! Static role catalog
//!
//! Roles are a closed set, so every lookup here is a total `match` over
//! [`Role`] rather than a runtime table that could miss an entry.

use super::types::{Capabilities, FieldSpec, Operation, ProfileField, Role};

/// Stateless lookup table of roles, capabilities, required fields and groups
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleCatalog;

impl RoleCatalog {
    /// Capabilities granted by a role
    pub fn capabilities_of(role: Role) -> Capabilities {
        match role {
            Role::Doctor => Capabilities {
                is_medical_staff: true,
                can_access_patient_records: true,
                can_prescribe_medication: true,
                can_manage_users: false,
            },
            Role::Nurse | Role::Pharmacy => Capabilities {
                is_medical_staff: true,
                can_access_patient_records: true,
                can_prescribe_medication: false,
                can_manage_users: false,
            },
            Role::Patient => Capabilities::default(),
            Role::Admin => Capabilities {
                can_manage_users: true,
                ..Capabilities::default()
            },
        }
    }

    /// Fields that must be non-empty for a profile of this role to be complete
    pub fn required_fields(role: Role) -> &'static [ProfileField] {
        match role {
            Role::Doctor | Role::Nurse => &[
                ProfileField::Role,
                ProfileField::Department,
                ProfileField::LicenseNumber,
            ],
            Role::Pharmacy => &[ProfileField::Role, ProfileField::LicenseNumber],
            Role::Patient | Role::Admin => &[ProfileField::Role],
        }
    }

    /// Name of the identity-provider group mirroring a role
    pub fn group_name_of(role: Role) -> &'static str {
        match role {
            Role::Patient => "Patients",
            Role::Doctor => "Doctors",
            Role::Nurse => "Nurses",
            Role::Pharmacy => "Pharmacy",
            Role::Admin => "Administrators",
        }
    }

    /// Inverse of [`RoleCatalog::group_name_of`]. `None` for groups that do
    /// not mirror a role.
    pub fn role_of_group(group: &str) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| Self::group_name_of(*role) == group)
    }

    /// Whether a group name is one of the role groups
    pub fn is_role_group(group: &str) -> bool {
        Self::role_of_group(group).is_some()
    }

    /// Human-readable role label
    pub fn display_name(role: Role) -> &'static str {
        match role {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
            Role::Nurse => "Nurse",
            Role::Pharmacy => "Pharmacy Personnel",
            Role::Admin => "System Administrator",
        }
    }

    /// Coarse grants the role group carries in the identity provider.
    ///
    /// These are what systems outside this crate see. Decisions made here
    /// go through the permission evaluator instead.
    pub fn group_grants(role: Role) -> &'static [Operation] {
        match role {
            Role::Patient | Role::Nurse => &[Operation::View, Operation::Change],
            Role::Doctor => &[Operation::View, Operation::Add, Operation::Change],
            Role::Pharmacy => &[Operation::View],
            Role::Admin => &Operation::ALL,
        }
    }

    /// Per-field form layout for a role: which fields are required and
    /// which are shown. License numbers are hidden from patients.
    pub fn form_schema(role: Role) -> Vec<FieldSpec> {
        let required = Self::required_fields(role);
        ProfileField::ALL
            .into_iter()
            .map(|field| FieldSpec {
                field,
                required: required.contains(&field),
                visible: !(role == Role::Patient && field == ProfileField::LicenseNumber),
            })
            .collect()
    }
}

impl Role {
    /// Shorthand for [`RoleCatalog::capabilities_of`]
    pub fn capabilities(self) -> Capabilities {
        RoleCatalog::capabilities_of(self)
    }

    /// Shorthand for [`RoleCatalog::required_fields`]
    pub fn required_fields(self) -> &'static [ProfileField] {
        RoleCatalog::required_fields(self)
    }

    /// Shorthand for [`RoleCatalog::group_name_of`]
    pub fn group_name(self) -> &'static str {
        RoleCatalog::group_name_of(self)
    }
}
