//! Type conversions for AccessError

use super::types::AccessError;
use crate::auth::groups::GroupSyncFailure;
use crate::auth::rbac::Decision;

impl From<GroupSyncFailure> for AccessError {
    fn from(failure: GroupSyncFailure) -> Self {
        AccessError::GroupSync(Box::new(failure))
    }
}

impl Decision {
    /// Turn a denial into `AccessError::PermissionDenied` for callers that
    /// want to propagate it with `?`
    pub fn into_result(self) -> Result<(), AccessError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(AccessError::PermissionDenied),
        }
    }
}
