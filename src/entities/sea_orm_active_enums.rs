//! Enumerated column types shared by several entities.
//!
//! Each status is stored as its lowercase snake-case name in a text column, so a row
//! can never hold a status outside these enumerations without failing to decode.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a customer order
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, awaiting confirmation (and possibly a quote)
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "in_production")]
    InProduction,
    #[sea_orm(string_value = "quality_check")]
    QualityCheck,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    /// Terminal
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Terminal
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    /// Paused; resumable to the status recorded in `previous_status`
    #[sea_orm(string_value = "on_hold")]
    OnHold,
}

/// Review lifecycle of a vendor application
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    /// Terminal
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Terminal
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Severity hint carried by a notification, used by the display layer for styling
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[sea_orm(string_value = "info")]
    Info,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "error")]
    Error,
}
