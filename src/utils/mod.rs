//! Utility modules
//!
//! - **error**: crate-wide error type
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;
