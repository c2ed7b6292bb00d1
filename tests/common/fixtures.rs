//! Test fixtures and data factories
//!
//! Factories create real domain objects, not mocks.

use pms_access::{Actor, Profile, Role};
use uuid::Uuid;

/// Factory for creating test profiles
pub struct ProfileFactory;

impl ProfileFactory {
    /// Complete profile for a role
    pub fn complete(role: Role) -> Profile {
        let profile = Profile::new(Uuid::new_v4(), role);
        match role {
            Role::Doctor | Role::Nurse => profile
                .with_department("Cardiology")
                .with_license_number(format!("LIC-{}", &Uuid::new_v4().to_string()[..8])),
            Role::Pharmacy => {
                profile.with_license_number(format!("PH-{}", &Uuid::new_v4().to_string()[..8]))
            }
            Role::Patient => profile
                .with_phone("555-0100")
                .with_address("1 Main Street"),
            Role::Admin => profile,
        }
    }

    /// Profile with only the role set
    pub fn bare(role: Role) -> Profile {
        Profile::new(Uuid::new_v4(), role)
    }

    /// `count` complete profiles cycling through every role
    pub fn mixed(count: usize) -> Vec<Profile> {
        (0..count)
            .map(|i| Self::complete(Role::ALL[i % Role::ALL.len()]))
            .collect()
    }
}

/// Factory for creating test actors
pub struct ActorFactory;

impl ActorFactory {
    /// Actor owning `profile`
    pub fn owner_of(profile: &Profile) -> Actor {
        Actor::new(profile.owner_id, profile.role)
    }

    pub fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Admin)
    }

    pub fn superuser() -> Actor {
        Actor::superuser(Uuid::new_v4(), None)
    }

    pub fn with_role(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_profiles_are_complete() {
        for role in Role::ALL {
            assert!(ProfileFactory::complete(role).is_complete(), "{}", role);
        }
    }

    #[test]
    fn test_mixed_cycles_roles() {
        let profiles = ProfileFactory::mixed(10);
        assert_eq!(profiles.len(), 10);
        assert_eq!(profiles.iter().filter(|p| p.role == Role::Nurse).count(), 2);
    }
}
