//! RBAC type definitions

use crate::utils::error::AccessError;
use serde::{Deserialize, Serialize};

/// Account role in the patient monitoring system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Role {
    /// Patient, sees only their own record
    Patient,
    /// Doctor
    Doctor,
    /// Nurse
    Nurse,
    /// Pharmacy personnel
    Pharmacy,
    /// System administrator
    Admin,
}

impl Role {
    /// Every role, in catalog order
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::Doctor,
        Role::Nurse,
        Role::Pharmacy,
        Role::Admin,
    ];

    /// Stored representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Pharmacy => "pharmacy",
            Role::Admin => "admin",
        }
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> Self {
        role.as_str()
    }
}

impl TryFrom<String> for Role {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "pharmacy" => Ok(Role::Pharmacy),
            "admin" => Ok(Role::Admin),
            _ => Err(AccessError::invalid_role(s)),
        }
    }
}

/// Capabilities derived from a role. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Doctor, nurse or pharmacy
    pub is_medical_staff: bool,
    /// May work with patient records
    pub can_access_patient_records: bool,
    /// May prescribe medication
    pub can_prescribe_medication: bool,
    /// May create, delete and re-role profiles
    pub can_manage_users: bool,
}

/// Profile field names, as exposed to presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Role,
    Department,
    LicenseNumber,
    Phone,
    Address,
}

impl ProfileField {
    /// Every profile field, in form order
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Role,
        ProfileField::Department,
        ProfileField::LicenseNumber,
        ProfileField::Phone,
        ProfileField::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Role => "role",
            ProfileField::Department => "department",
            ProfileField::LicenseNumber => "licenseNumber",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD operation on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    View,
    Add,
    Change,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::View,
        Operation::Add,
        Operation::Change,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Add => "add",
            Operation::Change => "change",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    /// Returns true if access was granted
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Returns true if access was denied
    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// Field entry of a role-specific profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: ProfileField,
    pub required: bool,
    /// Hidden fields should not be rendered at all
    pub visible: bool,
}
