//! Error types for the access-control engine

use crate::auth::groups::GroupSyncFailure;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AccessError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AccessError {
    /// Role value outside the closed role enumeration
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Second profile for the same account
    #[error("Profile already exists for account {0}")]
    DuplicateProfile(Uuid),

    /// Group membership could not be reconciled with the profile role
    #[error("Group synchronization failed for account {}: {}", .0.account_id, .0.cause)]
    GroupSync(Box<GroupSyncFailure>),

    /// Authorization denied. Carries no detail so callers cannot learn
    /// which record or field triggered the denial.
    #[error("Not authorized")]
    PermissionDenied,

    /// Group store errors (add/remove/list membership)
    #[error("Group store error: {0}")]
    GroupStore(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
