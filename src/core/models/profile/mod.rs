//! Profile models
//!
//! The protected record type and its completeness rules.

pub mod types;
pub mod validation;


pub use types::{Profile, ProfileChanges};
