//! Vendor review event entity - Append-only audit trail of application review transitions.

use super::sea_orm_active_enums::ApplicationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor review audit event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_review_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the application that was transitioned
    pub application_id: i64,
    pub from_status: ApplicationStatus,
    pub to_status: ApplicationStatus,
    /// User ID of the reviewer
    pub actor_id: String,
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor_application::Entity",
        from = "Column::ApplicationId",
        to = "super::vendor_application::Column::Id"
    )]
    Application,
}

impl Related<super::vendor_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
