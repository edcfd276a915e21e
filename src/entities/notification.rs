//! Notification entity - In-app messages produced by workflow transitions.
//!
//! Rows are inserted by the notification dispatcher and consumed by an external
//! display layer. The only field that ever changes after insert is `read`.

use super::sea_orm_active_enums::NotificationKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User ID of the recipient
    pub user_id: String,
    pub title: String,
    pub message: String,
    /// Display severity, stored in the `type` column
    #[sea_orm(column_name = "type")]
    pub kind: NotificationKind,
    /// Whether the recipient has seen the notification
    pub read: bool,
    /// Kind of entity that triggered the notification (`"order"` or `"vendor_application"`)
    pub related_type: String,
    /// ID of the entity that triggered the notification
    pub related_id: i64,
    pub created_at: DateTimeUtc,
}

/// Notifications only back-reference their origin by type and id
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
