//! Authorization system
//!
//! Actors, the RBAC engine and group membership synchronization.

pub mod actor;
pub mod groups;
pub mod rbac;

// Re-export commonly used types
pub use actor::Actor;
pub use groups::{GroupStore, GroupSyncFailure, GroupSynchronizer, InMemoryGroupStore, SyncOutcome};
pub use rbac::{
    Capabilities, Decision, FieldSpec, Operation, OwnedRecord, PermissionEvaluator, Predicate,
    ProfileField, Role, RoleCatalog, VisibilityFilter, VisibilityScope,
};
