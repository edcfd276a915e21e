//! Order entity - A customer's manufacturing order.
//!
//! Orders are created in `pending` by the storefront submission flow and afterwards
//! change status only through the workflow engine. `updated_at` doubles as the
//! optimistic concurrency token for those transitions.

use super::sea_orm_active_enums::OrderStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User ID of the customer who placed the order
    pub user_id: String,
    /// Current workflow status
    pub status: OrderStatus,
    /// Quoted price in dollars; `None` while the quote is pending
    pub price: Option<f64>,
    /// Requested material (e.g., "aluminum 6061")
    pub material: String,
    /// Number of parts ordered
    pub quantity: i32,
    /// Storage pointer to the uploaded design file
    pub file_url: String,
    /// Reason text attached to the most recent transition
    pub notes: Option<String>,
    /// Status the order was in when it was put on hold
    pub previous_status: Option<OrderStatus>,
    /// When the order was submitted
    pub created_at: DateTimeUtc,
    /// When the order was last transitioned
    pub updated_at: DateTimeUtc,
    /// Set when the order enters `shipped`
    pub shipped_at: Option<DateTimeUtc>,
    /// Set when the order enters `delivered`
    pub delivered_at: Option<DateTimeUtc>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many audit events
    #[sea_orm(has_many = "super::order_event::Entity")]
    Events,
}

impl Related<super::order_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
