//! Profile service
//!
//! Composes authorization, persistence and group synchronization. Every
//! mutation runs under a per-profile lock inside one database transaction,
//! so a role write never commits without its group memberships.

mod service;


pub use service::ProfileService;
