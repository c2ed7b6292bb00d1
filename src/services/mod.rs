//! Services module
//!
//! Orchestration on top of the RBAC core: the transactional profile
//! service and the operational audits behind the CLI.

pub mod profile;
pub mod reconcile;
pub mod report;

pub use profile::ProfileService;
pub use reconcile::{GroupReconciler, ReconcileEntry, ReconcileReport, ReconcileStatus};
pub use report::{AccessReport, AccessReportEntry};
