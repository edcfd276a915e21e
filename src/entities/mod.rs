//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod notification;
pub mod order;
pub mod order_event;
pub mod sea_orm_active_enums;
pub mod vendor_application;
pub mod vendor_document;
pub mod vendor_review_event;

// Re-export specific types to avoid conflicts
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_event::{Column as OrderEventColumn, Entity as OrderEvent, Model as OrderEventModel};
pub use sea_orm_active_enums::{ApplicationStatus, NotificationKind, OrderStatus};
pub use vendor_application::{
    Column as VendorApplicationColumn, Entity as VendorApplication,
    Model as VendorApplicationModel,
};
pub use vendor_document::{
    Column as VendorDocumentColumn, Entity as VendorDocument, Model as VendorDocumentModel,
};
pub use vendor_review_event::{
    Column as VendorReviewEventColumn, Entity as VendorReviewEvent,
    Model as VendorReviewEventModel,
};
