//! Integration tests for pms-access
//!
//! These tests run the real storage layer against in-memory SQLite.

pub mod config_tests;
pub mod database_tests;
pub mod group_sync_tests;
pub mod profile_service_tests;
