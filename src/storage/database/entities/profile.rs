use crate::auth::rbac::Role;
use crate::core::models::profile::Profile;
use crate::utils::error::Result as AccessResult;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Owning account ID (one profile per account)
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner_id: Uuid,

    /// Stored role value
    pub role: String,

    pub department: Option<String>,

    pub license_number: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between SeaORM model and our domain model
impl Model {
    /// Convert to the domain profile. Fails with `InvalidRole` when the
    /// stored role is not one of the known roles.
    pub fn to_domain_profile(&self) -> AccessResult<Profile> {
        let role: Role = self.role.parse()?;

        Ok(Profile {
            owner_id: self.owner_id,
            role,
            department: self.department.clone(),
            license_number: self.license_number.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        })
    }

    /// Build an active model from a domain profile
    pub fn from_domain_profile(profile: &Profile) -> ActiveModel {
        ActiveModel {
            owner_id: Set(profile.owner_id),
            role: Set(profile.role.as_str().to_string()),
            department: Set(profile.department.clone()),
            license_number: Set(profile.license_number.clone()),
            phone: Set(profile.phone.clone()),
            address: Set(profile.address.clone()),
            created_at: Set(profile.created_at.into()),
            updated_at: Set(profile.updated_at.into()),
        }
    }
}
