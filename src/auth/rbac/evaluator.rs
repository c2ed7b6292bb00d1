//! Permission evaluation for profile CRUD operations

use super::predicates::Predicate;
use super::types::{Decision, Operation};
use super::visibility::{OwnedRecord, VisibilityFilter};
use crate::auth::actor::Actor;
use tracing::debug;

/// Stateless evaluator combining predicates per CRUD operation
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    /// Authorize `operation` on `target`, or on the collection when
    /// `target` is `None`.
    ///
    /// Superusers and admins may do anything. Everyone else may view or
    /// change records they can access and see, and may never add or delete.
    pub fn authorize<R: OwnedRecord + ?Sized>(
        actor: &Actor,
        operation: Operation,
        target: Option<&R>,
    ) -> Decision {
        let decision = Self::decide(actor, operation, target);
        debug!(
            actor_id = %actor.id,
            role = ?actor.role,
            operation = %operation,
            target = ?target.map(|t| t.owner_id()),
            ?decision,
            "Authorization decision"
        );
        decision
    }

    /// Authorize a collection-level operation
    pub fn authorize_collection(actor: &Actor, operation: Operation) -> Decision {
        Self::authorize::<dyn OwnedRecord>(actor, operation, None)
    }

    /// Whether the actor may change a profile's role
    pub fn can_change_role(actor: &Actor) -> Decision {
        Decision::from(actor.is_superuser || actor.capabilities().can_manage_users)
    }

    fn decide<R: OwnedRecord + ?Sized>(
        actor: &Actor,
        operation: Operation,
        target: Option<&R>,
    ) -> Decision {
        if actor.is_admin() {
            return Decision::Allow;
        }
        if actor.role.is_none() {
            return Decision::Deny;
        }

        match operation {
            Operation::Add | Operation::Delete => Decision::Deny,
            Operation::View | Operation::Change => match target {
                None => Predicate::PatientAccess.evaluate::<R>(actor, None),
                Some(record) => Decision::from(
                    Predicate::PatientAccess.holds(actor, Some(record))
                        && VisibilityFilter::scope(actor).admits(record),
                ),
            },
        }
    }
}
