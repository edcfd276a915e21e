//! Notification dispatcher - turns an accepted transition into notification rows.
//!
//! [`plan`] is the pure mapping from a transition to the notifications it warrants;
//! [`dispatch`] inserts them. The engine calls `dispatch` at most once per committed
//! transition and only logs its failures.

use crate::{
    core::{clock, status::EntityType},
    entities::{ApplicationStatus, NotificationKind, OrderStatus, notification},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// The status change carried by a transition record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Order {
        from: OrderStatus,
        to: OrderStatus,
    },
    Application {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

impl Edge {
    #[must_use]
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::Order { .. } => EntityType::Order,
            Self::Application { .. } => EntityType::VendorApplication,
        }
    }
}

/// Everything the dispatcher needs to know about one accepted transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    /// ID of the transitioned entity
    pub entity_id: i64,
    /// User ID of the entity's owner, the usual recipient
    pub owner_id: String,
    /// User ID of whoever requested the transition
    pub actor_id: String,
    pub edge: Edge,
    /// Reason supplied with the request
    pub reason: Option<String>,
    /// Reviewer notes on the application after the transition
    pub review_notes: Option<String>,
}

/// A notification ready to be inserted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

fn with_notes(base: &str, notes: Option<&str>) -> String {
    match notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(notes) => format!("{base}\n\nReviewer notes: {notes}"),
        None => base.to_string(),
    }
}

/// Maps a transition to the notifications it should produce.
///
/// Deterministic in the record; transitions not listed here are silent.
#[must_use]
pub fn plan(record: &TransitionRecord) -> Vec<NotificationDraft> {
    let reason = record
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let to_owner = |title: String, message: String, kind: NotificationKind| NotificationDraft {
        user_id: record.owner_id.clone(),
        title,
        message,
        kind,
    };
    let id = record.entity_id;

    match record.edge {
        Edge::Order { to, .. } => match to {
            OrderStatus::Delivered => vec![to_owner(
                format!("Order #{id} delivered"),
                "Your order has been delivered".to_string(),
                NotificationKind::Success,
            )],
            OrderStatus::Cancelled => vec![to_owner(
                format!("Order #{id} cancelled"),
                reason.map_or_else(
                    || "Your order has been cancelled".to_string(),
                    ToString::to_string,
                ),
                NotificationKind::Warning,
            )],
            OrderStatus::OnHold => vec![to_owner(
                format!("Order #{id} on hold"),
                reason.map_or_else(
                    || "Your order has been placed on hold".to_string(),
                    |r| format!("Your order has been placed on hold: {r}"),
                ),
                NotificationKind::Warning,
            )],
            OrderStatus::Pending
            | OrderStatus::Confirmed
            | OrderStatus::InProduction
            | OrderStatus::QualityCheck
            | OrderStatus::Shipped => Vec::new(),
        },
        Edge::Application { to, .. } => {
            let notes = record.review_notes.as_deref();
            match to {
                ApplicationStatus::Approved => vec![to_owner(
                    "Vendor application approved".to_string(),
                    with_notes("Your vendor application has been approved.", notes),
                    NotificationKind::Success,
                )],
                ApplicationStatus::Rejected => vec![to_owner(
                    "Vendor application rejected".to_string(),
                    with_notes("Your vendor application was not approved.", notes),
                    NotificationKind::Error,
                )],
                ApplicationStatus::UnderReview => vec![to_owner(
                    "Vendor application under review".to_string(),
                    "We have started reviewing your vendor application.".to_string(),
                    NotificationKind::Info,
                )],
                ApplicationStatus::Pending => Vec::new(),
            }
        }
    }
}

/// Inserts the notifications planned for `record`.
///
/// All rows for one transition are inserted together or not at all.
///
/// # Errors
/// Returns `Error::Dispatch` if any insert fails; the transition itself is unaffected.
pub async fn dispatch<C>(db: &C, record: &TransitionRecord) -> Result<Vec<notification::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let drafts = plan(record);
    if drafts.is_empty() {
        debug!(
            entity = %record.edge.entity_type(),
            entity_id = record.entity_id,
            "Transition is silent; no notifications"
        );
        return Ok(Vec::new());
    }

    insert_all(db, record, drafts)
        .await
        .map_err(|e| Error::Dispatch {
            message: e.to_string(),
        })
}

async fn insert_all<C>(
    db: &C,
    record: &TransitionRecord,
    drafts: Vec<NotificationDraft>,
) -> std::result::Result<Vec<notification::Model>, DbErr>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let now = clock::now();
    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let model = notification::ActiveModel {
            user_id: Set(draft.user_id),
            title: Set(draft.title),
            message: Set(draft.message),
            kind: Set(draft.kind),
            read: Set(false),
            related_type: Set(record.edge.entity_type().as_str().to_string()),
            related_id: Set(record.entity_id),
            created_at: Set(now),
            ..Default::default()
        };
        created.push(model.insert(&txn).await?);
    }
    txn.commit().await?;

    debug!(
        entity_id = record.entity_id,
        count = created.len(),
        "Notifications dispatched"
    );
    Ok(created)
}
