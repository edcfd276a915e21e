//! Vendor document entity - File metadata for documents attached to an application.
//!
//! Only metadata is stored here; the bytes live in external blob storage at `storage_path`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the application this document supports
    pub application_id: i64,
    /// Original file name as uploaded
    pub file_name: String,
    /// Size in bytes
    pub file_size: i64,
    /// MIME type (e.g., "application/pdf")
    pub file_type: String,
    /// Pointer into blob storage
    pub storage_path: String,
    pub uploaded_at: DateTimeUtc,
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
