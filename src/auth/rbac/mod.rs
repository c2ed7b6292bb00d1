//! Role-Based Access Control (RBAC) engine
//!
//! Role catalog, composable predicates, CRUD authorization and record
//! visibility for profiles.

mod catalog;
mod evaluator;
mod predicates;
mod types;
mod visibility;

pub use catalog::RoleCatalog;
pub use evaluator::PermissionEvaluator;
pub use predicates::Predicate;
pub use types::{Capabilities, Decision, FieldSpec, Operation, ProfileField, Role};
pub use visibility::{OwnedRecord, VisibilityFilter, VisibilityScope};
