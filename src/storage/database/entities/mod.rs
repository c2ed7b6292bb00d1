/// Group membership entity module
pub mod group_membership;
/// Profile entity module
pub mod profile;

pub use group_membership::Entity as GroupMembership;
pub use profile::Entity as Profile;
