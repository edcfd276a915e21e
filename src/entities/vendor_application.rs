//! Vendor application entity - A company's request to sell through the marketplace.
//!
//! Applications start in `pending` and are moved through review by admins only.
//! Supporting documents live in [`super::vendor_document`] and are attached
//! independently of the review status.

use super::sea_orm_active_enums::ApplicationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor application database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_applications")]
pub struct Model {
    /// Unique identifier for the application
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User ID of the applicant
    pub user_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Free-text description of the vendor's capabilities
    pub business_description: Option<String>,
    /// Current review status
    pub status: ApplicationStatus,
    /// Reviewer's notes, only ever written by a review transition
    pub review_notes: Option<String>,
    pub created_at: DateTimeUtc,
    /// When the application was last transitioned
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `VendorApplication` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One application has many supporting documents
    #[sea_orm(has_many = "super::vendor_document::Entity")]
    Documents,
    /// One application has many review events
    #[sea_orm(has_many = "super::vendor_review_event::Entity")]
    ReviewEvents,
}

impl Related<super::vendor_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl Related<super::vendor_review_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
