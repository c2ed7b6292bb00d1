use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Group membership database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "group_memberships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Account holding the membership
    pub account_id: Uuid,

    /// Group name, unique per account
    pub group_name: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
