//! Workflow engine - applies a requested status transition end to end.
//!
//! Every accepted transition follows the same steps:
//!
//! 1. read the row and keep its `updated_at` as the concurrency token
//! 2. ask the authorization gate (`Forbidden` on denial)
//! 3. ask the validator (`IllegalTransition` on rejection)
//! 4. write status and side fields with one `UPDATE ... WHERE id = ? AND updated_at = token`
//!    (`ConcurrentModification` when no row matches; never retried here)
//! 5. append the audit event in the same database transaction as the write
//! 6. dispatch notifications after commit, logging but not propagating failures
//!
//! Nothing is written before steps 2 and 3 pass.

use crate::{
    config::workflow::{ResumePolicy, WorkflowConfig},
    core::{
        authorization::{Governed, Owned, can_transition},
        clock,
        dispatcher::{self, Edge, TransitionRecord},
        status::{Actor, EntityType, Role, parse_status},
        validator::{Rejection, StateGraph, illegal, validate},
    },
    entities::{
        ApplicationStatus, Order, OrderStatus, VendorApplication, order, order_event,
        vendor_application, vendor_review_event,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// A transition request as received from the admin UI, self-service pages or jobs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    /// User ID of the requester, from the session
    pub actor_id: String,
    /// Role of the requester, from the identity service
    pub actor_role: Role,
    pub entity_type: EntityType,
    pub entity_id: i64,
    /// Wire name of the target status
    pub to_status: String,
    /// Free-text reason; for vendor applications this becomes the review notes
    pub reason: Option<String>,
}

impl TransitionRequest {
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.actor_id.clone(), self.actor_role)
    }
}

/// The entity as it stands after an accepted transition
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum UpdatedEntity {
    Order(order::Model),
    VendorApplication(vendor_application::Model),
}

/// Handles a transition request: loads the entity, then applies the transition.
///
/// # Errors
/// `NotFound` if the entity does not exist, `IllegalTransition` if `to_status` is not a
/// status of that entity, and otherwise any error of [`transition_order`] or
/// [`transition_application`].
#[instrument(skip(db, config, request), fields(
    actor = %request.actor_id,
    entity = %request.entity_type,
    entity_id = request.entity_id,
    to = %request.to_status,
))]
pub async fn attempt_transition(
    db: &DatabaseConnection,
    config: &WorkflowConfig,
    request: TransitionRequest,
) -> Result<UpdatedEntity> {
    let actor = request.actor();
    match request.entity_type {
        EntityType::Order => {
            let snapshot = load_order(db, request.entity_id).await?;
            let to = target_status(snapshot.status, &request.to_status)?;
            transition_order(db, config, &actor, &snapshot, to, request.reason)
                .await
                .map(UpdatedEntity::Order)
        }
        EntityType::VendorApplication => {
            let snapshot = load_application(db, request.entity_id).await?;
            let to = target_status(snapshot.status, &request.to_status)?;
            transition_application(db, config, &actor, &snapshot, to, request.reason)
                .await
                .map(UpdatedEntity::VendorApplication)
        }
    }
}

/// Reads an order for a transition. The returned row carries the concurrency token.
pub async fn load_order<C>(db: &C, order_id: i64) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: EntityType::Order,
            entity_id: order_id,
        })
}

/// Reads a vendor application for a transition. The returned row carries the token.
pub async fn load_application<C>(db: &C, application_id: i64) -> Result<vendor_application::Model>
where
    C: ConnectionTrait,
{
    VendorApplication::find_by_id(application_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: EntityType::VendorApplication,
            entity_id: application_id,
        })
}

fn target_status<S: StateGraph>(current: S, name: &str) -> Result<S> {
    parse_status::<S>(name).ok_or_else(|| Error::IllegalTransition {
        entity: S::ENTITY,
        from: current.as_str().to_string(),
        to: name.to_string(),
        reason: Rejection::UnknownStatus,
    })
}

/// Runs the gate and the validator against a snapshot. Performs no I/O.
///
/// A repeated request for the current status is reported as `IllegalTransition`
/// before ownership is considered, so duplicate submissions get the same answer for
/// every actor.
fn authorize<S, E>(actor: &Actor, entity: &E, entity_id: i64, from: S, to: S) -> Result<()>
where
    S: Governed,
    E: Owned,
{
    if from == to {
        return Err(illegal(from, to, Rejection::SelfTransition));
    }
    if !can_transition(actor, entity, from, to) {
        warn!(
            actor = %actor.id,
            role = %actor.role,
            entity = %S::ENTITY,
            entity_id,
            from = from.as_str(),
            to = to.as_str(),
            "Transition denied"
        );
        return Err(Error::Forbidden {
            actor_id: actor.id.clone(),
            entity: S::ENTITY,
            entity_id,
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        });
    }
    validate(from, to)
}

fn check_resume(config: &WorkflowConfig, snapshot: &order::Model, to: OrderStatus) -> Result<()> {
    if snapshot.status != OrderStatus::OnHold
        || to == OrderStatus::Cancelled
        || config.orders.resume_policy == ResumePolicy::Any
    {
        return Ok(());
    }
    match snapshot.previous_status {
        Some(held_from) if held_from != to => Err(illegal(
            OrderStatus::OnHold,
            to,
            Rejection::ResumeMismatch,
        )),
        _ => Ok(()),
    }
}

/// Applies `snapshot.status -> to` to an order already read by the caller.
///
/// The write only succeeds if the row still carries `snapshot.updated_at`. Entering
/// `shipped` or `delivered` stamps the matching milestone, entering `on_hold` records
/// the status it was held from, and `notes` is replaced by `reason`.
///
/// # Errors
/// `Forbidden`, `IllegalTransition`, `ConcurrentModification`, or `Storage` if the
/// database call itself fails.
#[instrument(skip(db, config, actor, snapshot), fields(
    actor = %actor.id,
    order_id = snapshot.id,
    from = snapshot.status.as_str(),
    to = to.as_str(),
))]
pub async fn transition_order(
    db: &DatabaseConnection,
    config: &WorkflowConfig,
    actor: &Actor,
    snapshot: &order::Model,
    to: OrderStatus,
    reason: Option<String>,
) -> Result<order::Model> {
    let from = snapshot.status;
    authorize(actor, snapshot, snapshot.id, from, to)?;
    check_resume(config, snapshot, to)?;

    let now = clock::next_version(snapshot.updated_at);
    let mut patch = order::ActiveModel {
        status: Set(to),
        updated_at: Set(now),
        notes: Set(reason.clone()),
        ..Default::default()
    };
    match to {
        OrderStatus::Shipped => patch.shipped_at = Set(Some(now)),
        OrderStatus::Delivered => patch.delivered_at = Set(Some(now)),
        OrderStatus::OnHold => patch.previous_status = Set(Some(from)),
        _ => {}
    }
    if from == OrderStatus::OnHold {
        patch.previous_status = Set(None);
    }

    let txn = db.begin().await?;
    let result = Order::update_many()
        .set(patch)
        .filter(order::Column::Id.eq(snapshot.id))
        .filter(order::Column::UpdatedAt.eq(snapshot.updated_at))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        txn.rollback().await?;
        info!("Order changed since it was read; transition refused");
        return Err(Error::ConcurrentModification {
            entity: EntityType::Order,
            entity_id: snapshot.id,
        });
    }

    order_event::ActiveModel {
        order_id: Set(snapshot.id),
        from_status: Set(from),
        to_status: Set(to),
        actor_id: Set(actor.id.clone()),
        reason: Set(reason.clone()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let updated = load_order(&txn, snapshot.id).await?;
    txn.commit().await?;
    info!("Order transitioned");

    notify(
        db,
        config,
        &TransitionRecord {
            entity_id: updated.id,
            owner_id: updated.user_id.clone(),
            actor_id: actor.id.clone(),
            edge: Edge::Order { from, to },
            reason,
            review_notes: None,
        },
    )
    .await;

    Ok(updated)
}

/// Applies `snapshot.status -> to` to a vendor application already read by the caller.
///
/// A provided `reason` is stored as the application's `review_notes`; without one the
/// existing notes are kept.
///
/// # Errors
/// `Forbidden`, `IllegalTransition`, `ConcurrentModification`, or `Storage` if the
/// database call itself fails.
#[instrument(skip(db, config, actor, snapshot), fields(
    actor = %actor.id,
    application_id = snapshot.id,
    from = snapshot.status.as_str(),
    to = to.as_str(),
))]
pub async fn transition_application(
    db: &DatabaseConnection,
    config: &WorkflowConfig,
    actor: &Actor,
    snapshot: &vendor_application::Model,
    to: ApplicationStatus,
    reason: Option<String>,
) -> Result<vendor_application::Model> {
    let from = snapshot.status;
    authorize(actor, snapshot, snapshot.id, from, to)?;

    let now = clock::next_version(snapshot.updated_at);
    let mut patch = vendor_application::ActiveModel {
        status: Set(to),
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(notes) = &reason {
        patch.review_notes = Set(Some(notes.clone()));
    }

    let txn = db.begin().await?;
    let result = VendorApplication::update_many()
        .set(patch)
        .filter(vendor_application::Column::Id.eq(snapshot.id))
        .filter(vendor_application::Column::UpdatedAt.eq(snapshot.updated_at))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        txn.rollback().await?;
        info!("Application changed since it was read; transition refused");
        return Err(Error::ConcurrentModification {
            entity: EntityType::VendorApplication,
            entity_id: snapshot.id,
        });
    }

    vendor_review_event::ActiveModel {
        application_id: Set(snapshot.id),
        from_status: Set(from),
        to_status: Set(to),
        actor_id: Set(actor.id.clone()),
        reason: Set(reason.clone()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let updated = load_application(&txn, snapshot.id).await?;
    txn.commit().await?;
    info!("Vendor application transitioned");

    notify(
        db,
        config,
        &TransitionRecord {
            entity_id: updated.id,
            owner_id: updated.user_id.clone(),
            actor_id: actor.id.clone(),
            edge: Edge::Application { from, to },
            reason,
            review_notes: updated.review_notes.clone(),
        },
    )
    .await;

    Ok(updated)
}

/// Best-effort notification step. The transition has already committed.
async fn notify(db: &DatabaseConnection, config: &WorkflowConfig, record: &TransitionRecord) {
    if !config.notifications.enabled {
        debug!("Notifications disabled; skipping dispatch");
        return;
    }
    if let Err(e) = dispatcher::dispatch(db, record).await {
        warn!(
            entity = %record.edge.entity_type(),
            entity_id = record.entity_id,
            error = %e,
            "Notification dispatch failed after commit"
        );
    }
}
