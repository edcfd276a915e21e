//! Authorization gate - who may request which transition.
//!
//! The full permission matrix is the two `POLICY` tables below, keyed by entity type
//! (via the status enum), role and edge. A role with no row is denied everything.
//! Whether an edge exists at all is the validator's concern; admins are granted every
//! edge here and rely on [`crate::core::validator`] to refuse illegal ones.

use crate::{
    core::{status::Actor, status::Role, validator::StateGraph},
    entities::{ApplicationStatus, OrderModel, OrderStatus, VendorApplicationModel},
};

/// What a role may request on one entity type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant<S: 'static> {
    /// Any edge, on any entity, regardless of ownership
    AnyEdge,
    /// Only the listed self-service edges, and only on entities the actor owns
    OwnedEdges(&'static [(S, S)]),
}

/// A state graph with a permission table attached.
pub trait Governed: StateGraph {
    /// Permission rows for this entity type
    const POLICY: &'static [(Role, Grant<Self>)];
}

impl Governed for OrderStatus {
    const POLICY: &'static [(Role, Grant<Self>)] = &[
        (Role::Admin, Grant::AnyEdge),
        (
            Role::Customer,
            Grant::OwnedEdges(&[
                (Self::Pending, Self::Cancelled),
                (Self::Confirmed, Self::Cancelled),
            ]),
        ),
    ];
}

impl Governed for ApplicationStatus {
    const POLICY: &'static [(Role, Grant<Self>)] = &[
        (Role::Admin, Grant::AnyEdge),
        // Applicants cannot move their own application through review
        (Role::Customer, Grant::OwnedEdges(&[])),
    ];
}

/// An entity with an owning user.
pub trait Owned {
    /// User ID of the owner
    fn owner_id(&self) -> &str;
}

impl Owned for OrderModel {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for VendorApplicationModel {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

/// Decides whether `actor` may request `from -> to` on `entity`.
///
/// Ownership is checked only for grants that require it; an admin grant bypasses it.
#[must_use]
pub fn can_transition<S, E>(actor: &Actor, entity: &E, from: S, to: S) -> bool
where
    S: Governed,
    E: Owned + ?Sized,
{
    S::POLICY
        .iter()
        .filter(|(role, _)| *role == actor.role)
        .any(|(_, grant)| match grant {
            Grant::AnyEdge => true,
            Grant::OwnedEdges(edges) => {
                entity.owner_id() == actor.id && edges.contains(&(from, to))
            }
        })
}
