//! Shared test utilities for the workflow crate.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::workflow::WorkflowConfig,
    core::{
        clock, engine,
        order::{self, NewOrder},
        status::Actor,
        vendor::{self, NewApplication},
    },
    entities::{self, ApplicationStatus, NotificationKind, OrderStatus},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// User ID used for the admin that drives entities through their workflow in tests
pub const TEST_ADMIN_ID: &str = "admin-test";

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The admin actor used by the `drive_*` helpers.
pub fn test_admin() -> Actor {
    Actor::admin(TEST_ADMIN_ID)
}

/// Creates a pending test order owned by `user_id`.
///
/// # Defaults
/// * `material`: "aluminum 6061"
/// * `quantity`: 25
/// * `price`: None (pending quote)
pub async fn create_test_order(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entities::order::Model> {
    order::submit_order(
        db,
        NewOrder {
            user_id: user_id.to_string(),
            material: "aluminum 6061".to_string(),
            quantity: 25,
            file_url: format!("uploads/{user_id}/part.step"),
            price: None,
        },
    )
    .await
}

/// Creates a pending test vendor application owned by `user_id`.
pub async fn create_test_application(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entities::vendor_application::Model> {
    vendor::submit_application(
        db,
        NewApplication {
            user_id: user_id.to_string(),
            company_name: "Acme Machining".to_string(),
            contact_name: "Dana Reyes".to_string(),
            email: "dana@acme.example".to_string(),
            phone: None,
            business_description: Some("5-axis CNC, anodizing".to_string()),
        },
    )
    .await
}

/// Moves an order through `path` as the test admin, re-reading before every step.
/// Returns the order as it stands after the last step.
pub async fn drive_order(
    db: &DatabaseConnection,
    order_id: i64,
    path: &[OrderStatus],
) -> Result<entities::order::Model> {
    let config = WorkflowConfig::default();
    let admin = test_admin();
    let mut current = engine::load_order(db, order_id).await?;
    for &to in path {
        current = engine::transition_order(db, &config, &admin, &current, to, None).await?;
    }
    Ok(current)
}

/// Moves a vendor application through `path` as the test admin.
pub async fn drive_application(
    db: &DatabaseConnection,
    application_id: i64,
    path: &[ApplicationStatus],
) -> Result<entities::vendor_application::Model> {
    let config = WorkflowConfig::default();
    let admin = test_admin();
    let mut current = engine::load_application(db, application_id).await?;
    for &to in path {
        current =
            engine::transition_application(db, &config, &admin, &current, to, None).await?;
    }
    Ok(current)
}

/// Admin path from `pending` to `status`.
pub fn order_path_to(status: OrderStatus) -> Vec<OrderStatus> {
    use OrderStatus::{
        Cancelled, Confirmed, Delivered, InProduction, OnHold, Pending, QualityCheck, Shipped,
    };
    match status {
        Pending => vec![],
        Confirmed => vec![Confirmed],
        InProduction => vec![Confirmed, InProduction],
        QualityCheck => vec![Confirmed, InProduction, QualityCheck],
        Shipped => vec![Confirmed, InProduction, QualityCheck, Shipped],
        Delivered => vec![Confirmed, InProduction, QualityCheck, Shipped, Delivered],
        Cancelled => vec![Cancelled],
        OnHold => vec![Confirmed, OnHold],
    }
}

/// Admin path from `pending` to `status`.
pub fn application_path_to(status: ApplicationStatus) -> Vec<ApplicationStatus> {
    use ApplicationStatus::{Approved, Pending, Rejected, UnderReview};
    match status {
        Pending => vec![],
        UnderReview => vec![UnderReview],
        Approved => vec![UnderReview, Approved],
        Rejected => vec![Rejected],
    }
}

/// Inserts an unread info notification for `user_id` directly, bypassing the dispatcher.
pub async fn insert_test_notification(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entities::notification::Model> {
    let model = entities::notification::ActiveModel {
        user_id: Set(user_id.to_string()),
        title: Set("Test notification".to_string()),
        message: Set("Something happened".to_string()),
        kind: Set(NotificationKind::Info),
        read: Set(false),
        related_type: Set("order".to_string()),
        related_id: Set(1),
        created_at: Set(clock::now()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}
