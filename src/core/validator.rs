//! Transition validation - the legal state graph of each workflow entity.
//!
//! The graphs are plain match tables on the status enums. Validation is pure: it knows
//! nothing about actors or storage and only answers whether `from -> to` is an edge.

use crate::{
    core::status::{EntityType, parse_status},
    entities::{ApplicationStatus, OrderStatus},
    errors::{Error, Result},
};
use std::{fmt, hash::Hash};

/// Why a requested transition was refused by the state graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// `from == to`; usually a duplicate submission
    SelfTransition,
    /// The current status has no outgoing edges
    TerminalState,
    /// The edge is not declared in the graph
    NotAnEdge,
    /// A status name outside the entity's enumeration
    UnknownStatus,
    /// Leaving `on_hold` for a status other than the one it was held from
    ResumeMismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SelfTransition => "status is unchanged",
            Self::TerminalState => "source status is terminal",
            Self::NotAnEdge => "not an edge of the state graph",
            Self::UnknownStatus => "unknown status",
            Self::ResumeMismatch => "a held order may only resume to the status it was held from",
        };
        f.write_str(text)
    }
}

/// A status enumeration with a declared transition graph.
pub trait StateGraph: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Which entity this graph governs
    const ENTITY: EntityType;
    /// Every member of the enumeration
    const ALL: &'static [Self];

    /// Wire name of the status
    fn as_str(self) -> &'static str;

    /// Statuses reachable in one step
    fn successors(self) -> &'static [Self];

    /// Whether the status has no outgoing edges
    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl StateGraph for OrderStatus {
    const ENTITY: EntityType = EntityType::Order;
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Confirmed,
        Self::InProduction,
        Self::QualityCheck,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::OnHold,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProduction => "in_production",
            Self::QualityCheck => "quality_check",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::OnHold => "on_hold",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::InProduction, Self::OnHold, Self::Cancelled],
            Self::InProduction => &[Self::QualityCheck, Self::OnHold],
            // Failed QC goes back to production
            Self::QualityCheck => &[Self::Shipped, Self::InProduction],
            Self::Shipped => &[Self::Delivered],
            Self::OnHold => &[Self::Confirmed, Self::InProduction, Self::Cancelled],
            Self::Delivered | Self::Cancelled => &[],
        }
    }
}

impl StateGraph for ApplicationStatus {
    const ENTITY: EntityType = EntityType::VendorApplication;
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::UnderReview,
        Self::Approved,
        Self::Rejected,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::UnderReview, Self::Rejected],
            // Reviewer may bounce the application back for more information
            Self::UnderReview => &[Self::Approved, Self::Rejected, Self::Pending],
            Self::Approved | Self::Rejected => &[],
        }
    }
}

/// Builds the `IllegalTransition` error for an edge of graph `S`.
pub fn illegal<S: StateGraph>(from: S, to: S, reason: Rejection) -> Error {
    Error::IllegalTransition {
        entity: S::ENTITY,
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
        reason,
    }
}

/// Checks `from -> to` against the state graph of `S`.
///
/// # Errors
/// Returns `Error::IllegalTransition` for a self-transition, a transition out of a
/// terminal status, or any edge the graph does not declare.
pub fn validate<S: StateGraph>(from: S, to: S) -> Result<()> {
    if from == to {
        return Err(illegal(from, to, Rejection::SelfTransition));
    }
    if from.is_terminal() {
        return Err(illegal(from, to, Rejection::TerminalState));
    }
    if !from.successors().contains(&to) {
        return Err(illegal(from, to, Rejection::NotAnEdge));
    }
    Ok(())
}

/// Validates a transition given as wire names, dispatching on the entity type.
///
/// # Errors
/// Returns `Error::IllegalTransition` with [`Rejection::UnknownStatus`] when either name
/// is not a member of the entity's enumeration, otherwise as [`validate`].
pub fn validate_named(entity: EntityType, from: &str, to: &str) -> Result<()> {
    match entity {
        EntityType::Order => validate_parsed::<OrderStatus>(from, to),
        EntityType::VendorApplication => validate_parsed::<ApplicationStatus>(from, to),
    }
}

fn validate_parsed<S: StateGraph>(from: &str, to: &str) -> Result<()> {
    match (parse_status::<S>(from), parse_status::<S>(to)) {
        (Some(from), Some(to)) => validate(from, to),
        _ => Err(Error::IllegalTransition {
            entity: S::ENTITY,
            from: from.to_string(),
            to: to.to_string(),
            reason: Rejection::UnknownStatus,
        }),
    }
}
