//! Identity and naming types shared across the workflow core.
//!
//! Roles, entity kinds and status names all cross the request boundary as strings.
//! Roles and entity kinds have `FromStr`/`Display` here; statuses are looked up by
//! wire name with [`parse_status`].

use crate::{
    core::validator::StateGraph,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Role of the requesting user, as reported by the identity service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(Error::Config {
                message: format!("Unknown role '{other}'"),
            }),
        }
    }
}

/// The kinds of entity governed by the workflow engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Order,
    VendorApplication,
}

impl EntityType {
    /// Returns the name used in requests and in `notifications.related_type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::VendorApplication => "vendor_application",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "order" => Ok(Self::Order),
            "vendor_application" => Ok(Self::VendorApplication),
            other => Err(Error::Config {
                message: format!("Unknown entity type '{other}'"),
            }),
        }
    }
}

/// The user on whose behalf a transition is requested
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    /// User ID from the identity service
    pub id: String,
    pub role: Role,
}

impl Actor {
    /// Creates an actor with the given id and role.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Shorthand for an admin actor.
    #[must_use]
    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Shorthand for a customer actor.
    #[must_use]
    pub fn customer(id: impl Into<String>) -> Self {
        Self::new(id, Role::Customer)
    }
}

/// Looks up a status by wire name. Returns `None` for names outside the enumeration.
pub fn parse_status<S: StateGraph>(name: &str) -> Option<S> {
    S::ALL.iter().copied().find(|s| s.as_str() == name.trim())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{ApplicationStatus, OrderStatus};

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" customer ".parse::<Role>().unwrap(), Role::Customer);
        assert!("vendor".parse::<Role>().is_err());
    }

    #[test]
    fn test_entity_type_round_trips_through_its_name() {
        for entity in [EntityType::Order, EntityType::VendorApplication] {
            assert_eq!(entity.as_str().parse::<EntityType>().unwrap(), entity);
        }
        assert!("invoice".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_parse_status_rejects_unknown_names() {
        assert_eq!(
            parse_status::<OrderStatus>("in_production"),
            Some(OrderStatus::InProduction)
        );
        assert_eq!(
            parse_status::<ApplicationStatus>("under_review"),
            Some(ApplicationStatus::UnderReview)
        );
        assert_eq!(parse_status::<OrderStatus>("under_review"), None);
        assert_eq!(parse_status::<ApplicationStatus>("shipped"), None);
    }
}
