//! Order business logic - submission and read access for customer orders.
//!
//! Orders enter the system here in `pending`. Every later status change goes through
//! [`crate::core::engine`]; nothing in this module writes `status`.

use crate::{
    core::clock,
    entities::{Order, OrderEvent, OrderStatus, order, order_event},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields supplied by the storefront when a customer places an order
#[derive(Clone, Debug)]
pub struct NewOrder {
    /// User ID of the customer
    pub user_id: String,
    pub material: String,
    pub quantity: i32,
    /// Storage pointer to the uploaded design file
    pub file_url: String,
    /// Instant-quote price, if one was computed at submission time
    pub price: Option<f64>,
}

/// Creates a new order in `pending`.
///
/// Validates that the material and file reference are present, the quantity is positive
/// and any price is a finite non-negative amount.
pub async fn submit_order<C>(db: &C, new_order: NewOrder) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    if new_order.material.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Order material cannot be empty".to_string(),
        });
    }
    if new_order.file_url.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Order must reference an uploaded file".to_string(),
        });
    }
    if new_order.quantity <= 0 {
        return Err(Error::InvalidInput {
            message: format!("Quantity must be positive, got {}", new_order.quantity),
        });
    }
    if let Some(price) = new_order.price.filter(|p| !p.is_finite() || *p < 0.0) {
        return Err(Error::InvalidInput {
            message: format!("Invalid price {price}"),
        });
    }

    let now = clock::now();
    let model = order::ActiveModel {
        user_id: Set(new_order.user_id),
        status: Set(OrderStatus::Pending),
        price: Set(new_order.price),
        material: Set(new_order.material.trim().to_string()),
        quantity: Set(new_order.quantity),
        file_url: Set(new_order.file_url),
        notes: Set(None),
        previous_status: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        shipped_at: Set(None),
        delivered_at: Set(None),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(order_id = created.id, user_id = %created.user_id, "Order submitted");
    Ok(created)
}

/// Finds an order by its unique ID.
pub async fn get_order<C>(db: &C, order_id: i64) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Retrieves all orders placed by a user, newest first.
pub async fn list_orders_for_user<C>(db: &C, user_id: &str) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every order currently in `status`, oldest first. Used by back-office queues.
pub async fn list_orders_by_status<C>(db: &C, status: OrderStatus) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::Status.eq(status))
        .order_by_asc(order::Column::CreatedAt)
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the audit trail of an order in the order the transitions happened.
pub async fn order_history<C>(db: &C, order_id: i64) -> Result<Vec<order_event::Model>>
where
    C: ConnectionTrait,
{
    OrderEvent::find()
        .filter(order_event::Column::OrderId.eq(order_id))
        .order_by_asc(order_event::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
