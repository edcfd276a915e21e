//! Order event entity - Append-only audit trail of accepted order transitions.

use super::sea_orm_active_enums::OrderStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order audit event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order that was transitioned
    pub order_id: i64,
    pub from_status: OrderStatus,
    pub to_status: OrderStatus,
    /// User ID of the actor who requested the transition
    pub actor_id: String,
    /// Optional free-text reason supplied with the request
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `OrderEvent` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each event belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
