//! Profile completeness checks
//!
//! Incomplete profiles are a normal state (e.g. mid-registration), so
//! nothing here fails. Callers that need completeness check it explicitly.

use super::types::Profile;
use crate::auth::rbac::ProfileField;

impl Profile {
    /// Required fields of the profile's role that are empty, in
    /// required-field order
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        self.role
            .required_fields()
            .iter()
            .copied()
            .filter(|field| is_blank(self.value_of(*field)))
            .collect()
    }

    /// Every required field is populated
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Absent, empty and whitespace-only values all count as empty
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
