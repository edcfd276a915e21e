//! Core business logic - the status workflow for orders and vendor applications.
//!
//! Everything here takes a `SeaORM` connection and is independent of how requests
//! arrive (admin UI, self-service pages, scheduled jobs).

/// Authorization gate: role and ownership permission table
pub mod authorization;
/// Timestamp helpers for rows and concurrency tokens
pub mod clock;
/// Notification dispatcher: transition to notification rows
pub mod dispatcher;
/// Workflow engine: authorize, validate, conditional write, audit, notify
pub mod engine;
/// Recipient-side notification access
pub mod notification;
/// Order submission and queries
pub mod order;
/// Roles, entity types and status naming
pub mod status;
/// Transition validator: per-entity state graphs
pub mod validator;
/// Vendor application submission, documents and review history
pub mod vendor;
