//! Authenticated actor as supplied by the identity provider

use crate::auth::rbac::{Capabilities, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The account on whose behalf an operation is evaluated.
///
/// `role` is `None` when the account has no profile yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Account ID
    pub id: Uuid,
    /// Role taken from the account's profile
    pub role: Option<Role>,
    /// Identity-provider superuser flag
    #[serde(default)]
    pub is_superuser: bool,
}

impl Actor {
    /// Regular actor with a profile
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role: Some(role),
            is_superuser: false,
        }
    }

    /// Superuser actor. The role is kept for display, it never restricts.
    pub fn superuser(id: Uuid, role: Option<Role>) -> Self {
        Self {
            id,
            role,
            is_superuser: true,
        }
    }

    /// Actor whose account has no profile
    pub fn without_profile(id: Uuid) -> Self {
        Self {
            id,
            role: None,
            is_superuser: false,
        }
    }

    /// Capabilities of the actor's role, none when there is no profile
    pub fn capabilities(&self) -> Capabilities {
        self.role.map(Role::capabilities).unwrap_or_default()
    }

    /// Superuser or admin role
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.role == Some(Role::Admin)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}
