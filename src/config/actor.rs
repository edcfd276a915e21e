//! Acting user for command-line and scheduled-job invocations.
//!
//! The identity service is the source of truth for roles; jobs that run outside a
//! user session receive their identity through `ACTOR_ID` and `ACTOR_ROLE`.

use crate::core::status::{Actor, Role};
use crate::errors::Result;

/// Reads the acting user from `ACTOR_ID` and `ACTOR_ROLE`.
///
/// # Errors
/// Returns `Error::EnvVar` if either variable is unset, or `Error::Config` if the role
/// is not a known role name.
pub fn actor_from_env() -> Result<Actor> {
    let id = std::env::var("ACTOR_ID")?;
    let role: Role = std::env::var("ACTOR_ROLE")?.parse()?;
    Ok(Actor::new(id, role))
}
