//! Composable access predicates
//!
//! Each predicate is a pure function of the actor's capabilities and,
//! where relevant, the target record. They combine with [`Predicate::AnyOf`]
//! and [`Predicate::AllOf`] instead of layering behaviours.

use super::types::{Decision, Role};
use super::visibility::OwnedRecord;
use crate::auth::actor::Actor;

/// Access predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Superuser or admin role
    AdminOnly,
    /// Doctor, nurse or pharmacy
    MedicalStaff,
    /// Patient on their own record, or staff/admin on any record
    PatientAccess,
    /// Doctor role only
    DoctorOnly,
    /// Superuser flag only
    SuperuserOverride,
    /// At least one predicate holds
    AnyOf(Vec<Predicate>),
    /// Every predicate holds
    AllOf(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate the predicate. Superusers are allowed before anything else
    /// is looked at.
    pub fn evaluate<R: OwnedRecord + ?Sized>(&self, actor: &Actor, target: Option<&R>) -> Decision {
        Decision::from(actor.is_superuser || self.holds(actor, target))
    }

    /// Evaluate the predicate with no target record
    pub fn evaluate_actor(&self, actor: &Actor) -> Decision {
        self.evaluate::<dyn OwnedRecord>(actor, None)
    }

    /// Raw truth value, without the superuser override
    pub fn holds<R: OwnedRecord + ?Sized>(&self, actor: &Actor, target: Option<&R>) -> bool {
        match self {
            Predicate::AdminOnly => actor.is_admin(),
            Predicate::MedicalStaff => actor.capabilities().is_medical_staff,
            Predicate::PatientAccess => patient_access(actor, target),
            Predicate::DoctorOnly => actor.has_role(Role::Doctor),
            Predicate::SuperuserOverride => actor.is_superuser,
            Predicate::AnyOf(predicates) => predicates.iter().any(|p| p.holds(actor, target)),
            Predicate::AllOf(predicates) => predicates.iter().all(|p| p.holds(actor, target)),
        }
    }
}

fn patient_access<R: OwnedRecord + ?Sized>(actor: &Actor, target: Option<&R>) -> bool {
    let Some(role) = actor.role else {
        return false;
    };

    if role.capabilities().is_medical_staff || role == Role::Admin {
        return true;
    }

    match target {
        Some(record) => role == Role::Patient && record.owner_id() == actor.id,
        // Collection level; the visibility filter narrows the result
        None => role == Role::Patient,
    }
}
