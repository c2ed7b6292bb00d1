//! Helper functions for creating specific error types

use super::types::AccessError;

/// Helper functions for creating specific errors
impl AccessError {
    pub fn invalid_role<S: Into<String>>(value: S) -> Self {
        Self::InvalidRole(value.into())
    }

    pub fn group_store<S: Into<String>>(message: S) -> Self {
        Self::GroupStore(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl AccessError {
    /// Storage and group-store failures are worth retrying with the same
    /// idempotent call. Decisions and parse failures never are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::GroupSync(_) | Self::GroupStore(_) | Self::Database(_) | Self::Io(_)
        )
    }

    /// Whether this error is an authorization denial
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
