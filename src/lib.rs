//! # pms-access
//!
//! Role-based access control for a patient monitoring system.
//!
//! ## Features
//!
//! - **Role catalog**: five fixed roles with derived capabilities, required
//!   profile fields and their mirrored identity-provider groups
//! - **Profile validation**: completeness is reported, never enforced
//! - **Group synchronization**: keeps each account in exactly its role group,
//!   with retries and explicit partial-failure reporting
//! - **Permission evaluation**: composable predicates and CRUD decisions
//! - **Visibility filtering**: one scope rule shared by in-memory filtering
//!   and database queries
//!
//! ## Quick Start
//!
//! ```rust
//! use pms_access::{Actor, Operation, PermissionEvaluator, Profile, Role, VisibilityFilter};
//! use uuid::Uuid;
//!
//! let me = Profile::new(Uuid::new_v4(), Role::Patient);
//! let other = Profile::new(Uuid::new_v4(), Role::Patient);
//! let actor = Actor::new(me.owner_id, Role::Patient);
//!
//! assert!(PermissionEvaluator::authorize(&actor, Operation::View, Some(&me)).is_allowed());
//! assert!(PermissionEvaluator::authorize(&actor, Operation::View, Some(&other)).is_denied());
//!
//! let records = vec![me.clone(), other];
//! assert_eq!(VisibilityFilter::visible_records(&actor, &records).len(), 1);
//! ```
//!
//! ## Service Mode
//!
//! ```rust,no_run
//! use pms_access::{Config, GroupSynchronizer, ProfileService, Role};
//! use pms_access::storage::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/access.yaml").await?;
//!     let database = Database::new(config.database()).await?;
//!     database.migrate().await?;
//!
//!     let service = ProfileService::new(
//!         Arc::new(database),
//!         GroupSynchronizer::new(config.group_sync().clone()),
//!     );
//!     service.provision(uuid::Uuid::new_v4(), Role::Patient).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{
    Actor, Capabilities, Decision, FieldSpec, GroupStore, GroupSyncFailure, GroupSynchronizer,
    InMemoryGroupStore, OwnedRecord, Operation, PermissionEvaluator, Predicate, ProfileField,
    Role, RoleCatalog, SyncOutcome, VisibilityFilter, VisibilityScope,
};
pub use config::Config;
pub use core::models::{Profile, ProfileChanges};
pub use services::{AccessReport, GroupReconciler, ProfileService, ReconcileReport};
pub use utils::error::{AccessError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the Unix epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
