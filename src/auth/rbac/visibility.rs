//! Record visibility filtering
//!
//! The visibility rule lives in [`VisibilityScope`] so that the in-memory
//! filter and the database query builder cannot drift apart.

use super::types::Role;
use crate::auth::actor::Actor;
use uuid::Uuid;

/// A record owned by exactly one account and carrying that account's role
pub trait OwnedRecord {
    fn owner_id(&self) -> Uuid;
    fn role(&self) -> Role;
}

/// Which records an actor may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Every record
    All,
    /// Every patient record plus the actor's own
    PatientsAndOwn(Uuid),
    /// Only the actor's own record
    OwnOnly(Uuid),
    /// No records at all
    Nothing,
}

impl VisibilityScope {
    /// Whether a record falls inside the scope
    pub fn admits<R: OwnedRecord + ?Sized>(&self, record: &R) -> bool {
        match self {
            VisibilityScope::All => true,
            VisibilityScope::PatientsAndOwn(id) => {
                record.role() == Role::Patient || record.owner_id() == *id
            }
            VisibilityScope::OwnOnly(id) => record.owner_id() == *id,
            VisibilityScope::Nothing => false,
        }
    }
}

/// Projects record sets down to what an actor may see
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityFilter;

impl VisibilityFilter {
    /// Visibility scope for an actor
    pub fn scope(actor: &Actor) -> VisibilityScope {
        if actor.is_admin() {
            return VisibilityScope::All;
        }

        match actor.role {
            Some(role) if role.capabilities().is_medical_staff => {
                VisibilityScope::PatientsAndOwn(actor.id)
            }
            Some(Role::Patient) => VisibilityScope::OwnOnly(actor.id),
            _ => VisibilityScope::Nothing,
        }
    }

    /// Borrow the visible subset of `records`, keeping input order
    pub fn visible_records<'a, R: OwnedRecord>(actor: &Actor, records: &'a [R]) -> Vec<&'a R> {
        let scope = Self::scope(actor);
        records.iter().filter(|r| scope.admits(*r)).collect()
    }

    /// Consume `records` and keep the visible subset
    pub fn retain_visible<R: OwnedRecord>(actor: &Actor, mut records: Vec<R>) -> Vec<R> {
        let scope = Self::scope(actor);
        records.retain(|r| scope.admits(r));
        records
    }
}
