//! Core data models

pub mod profile;

pub use profile::{Profile, ProfileChanges};
