//! Group membership synchronization
//!
//! The identity provider authorizes coarsely by group. Each account holds
//! exactly one role group mirroring its profile role; this module keeps it
//! that way.

mod store;
mod sync;

#[cfg(test)]
pub use store::MockGroupStore;
pub use store::{GroupStore, InMemoryGroupStore};
pub use sync::{GroupSyncFailure, GroupSynchronizer, SyncOutcome};
