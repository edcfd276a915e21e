//! Unified error type for the workflow engine.
//!
//! The first four workflow variants are terminal for a request and are meant to be
//! shown to the caller verbatim. `Storage` wraps adapter failures and is safe to retry.
//! `Dispatch` is only produced by the notification step and never aborts a committed
//! transition.

use crate::core::status::EntityType;
use crate::core::validator::Rejection;
use thiserror::Error;

/// All errors produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// The actor lacks the role or ownership required for the request
    #[error("Actor {actor_id} may not move {entity} {entity_id} from {from} to {to}")]
    Forbidden {
        actor_id: String,
        entity: EntityType,
        entity_id: i64,
        from: String,
        to: String,
    },

    /// The requested edge is not part of the entity's state graph
    #[error("Illegal {entity} transition {from} -> {to}: {reason}")]
    IllegalTransition {
        entity: EntityType,
        from: String,
        to: String,
        reason: Rejection,
    },

    /// The row changed between the read and the conditional write
    #[error("{entity} {entity_id} was modified concurrently; re-read and resubmit")]
    ConcurrentModification { entity: EntityType, entity_id: i64 },

    /// No row with this id exists
    #[error("{entity} {entity_id} not found")]
    NotFound { entity: EntityType, entity_id: i64 },

    /// The notification step failed after the transition committed
    #[error("Notification dispatch failed: {message}")]
    Dispatch { message: String },

    /// No notification with this id exists
    #[error("Notification {notification_id} not found")]
    NotificationNotFound { notification_id: i64 },

    /// Only the recipient may change a notification
    #[error("User {user_id} is not the recipient of notification {notification_id}")]
    NotRecipient {
        user_id: String,
        notification_id: i64,
    },

    /// Submitted data failed validation
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Storage adapter failure
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Whether the caller may safely resubmit the same request unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_storage_errors_are_retryable() {
        let storage = Error::Storage(sea_orm::DbErr::Custom("connection reset".to_string()));
        assert!(storage.is_retryable());

        let conflict = Error::ConcurrentModification {
            entity: EntityType::Order,
            entity_id: 1,
        };
        assert!(!conflict.is_retryable());

        let missing = Error::NotFound {
            entity: EntityType::VendorApplication,
            entity_id: 7,
        };
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_error_messages_name_the_entity() {
        let err = Error::IllegalTransition {
            entity: EntityType::Order,
            from: "delivered".to_string(),
            to: "cancelled".to_string(),
            reason: Rejection::TerminalState,
        };
        assert_eq!(
            err.to_string(),
            "Illegal order transition delivered -> cancelled: source status is terminal"
        );
    }
}
