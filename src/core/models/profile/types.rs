//! Core profile types

use crate::auth::rbac::{Capabilities, OwnedRecord, ProfileField, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Professional identity attached to exactly one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning account ID (unique, immutable)
    pub owner_id: Uuid,
    /// Role in the patient monitoring system
    pub role: Role,
    /// Department or ward assignment
    pub department: Option<String>,
    /// Professional license number (for medical staff)
    pub license_number: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Profile {
    /// Create a profile with no optional fields set
    pub fn new(owner_id: Uuid, role: Role) -> Self {
        let now = chrono::Utc::now();
        Self {
            owner_id,
            role,
            department: None,
            license_number: None,
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_license_number(mut self, license_number: impl Into<String>) -> Self {
        self.license_number = Some(license_number.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Capabilities derived from the profile's role
    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    /// Raw value of a field
    pub fn value_of(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Role => Some(self.role.as_str()),
            ProfileField::Department => self.department.as_deref(),
            ProfileField::LicenseNumber => self.license_number.as_deref(),
            ProfileField::Phone => self.phone.as_deref(),
            ProfileField::Address => self.address.as_deref(),
        }
    }

    /// Apply a set of changes and bump `updated_at`.
    ///
    /// Returns the previous role when the role actually changed.
    pub fn apply(&mut self, changes: ProfileChanges) -> Option<Role> {
        let previous_role = match changes.role {
            Some(role) if role != self.role => Some(std::mem::replace(&mut self.role, role)),
            _ => None,
        };

        if let Some(value) = changes.department {
            self.department = non_empty(value);
        }
        if let Some(value) = changes.license_number {
            self.license_number = non_empty(value);
        }
        if let Some(value) = changes.phone {
            self.phone = non_empty(value);
        }
        if let Some(value) = changes.address {
            self.address = non_empty(value);
        }

        self.updated_at = chrono::Utc::now();
        previous_role
    }
}

impl OwnedRecord for Profile {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn role(&self) -> Role {
        self.role
    }
}

/// Partial update of a profile.
///
/// `None` leaves a field untouched; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChanges {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ProfileChanges {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
