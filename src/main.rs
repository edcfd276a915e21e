use forge_workflow::{
    config,
    core::{
        engine::{self, TransitionRequest, UpdatedEntity},
        status::Actor,
    },
    errors::{Error, Result},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: forge-workflow <order|vendor_application> <entity_id> <to_status> [reason]";

/// Parses `<entity_type> <entity_id> <to_status> [reason...]` for the acting user.
fn parse_request(args: &[String], actor: &Actor) -> Result<TransitionRequest> {
    let [entity_type, entity_id, to_status, reason @ ..] = args else {
        return Err(Error::Config {
            message: USAGE.to_string(),
        });
    };
    let entity_id = entity_id.parse::<i64>().map_err(|e| Error::Config {
        message: format!("Invalid entity id '{entity_id}': {e}"),
    })?;
    let reason = (!reason.is_empty()).then(|| reason.join(" "));

    Ok(TransitionRequest {
        actor_id: actor.id.clone(),
        actor_role: actor.role,
        entity_type: entity_type.parse()?,
        entity_id,
        to_status: to_status.clone(),
        reason,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load workflow configuration and the acting user
    let workflow_config = config::workflow::load_default_config()
        .inspect_err(|e| error!("Failed to load workflow configuration: {}", e))?;
    let actor = config::actor::actor_from_env()
        .inspect_err(|e| error!("ACTOR_ID / ACTOR_ROLE not usable: {}", e))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args, &actor)?;

    // 4. Connect and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;

    // 5. Apply the transition
    match engine::attempt_transition(&db, &workflow_config, request).await {
        Ok(UpdatedEntity::Order(order)) => {
            info!(order_id = order.id, status = ?order.status, "Order updated");
            Ok(())
        }
        Ok(UpdatedEntity::VendorApplication(application)) => {
            info!(
                application_id = application.id,
                status = ?application.status,
                "Vendor application updated"
            );
            Ok(())
        }
        Err(e) => {
            if e.is_retryable() {
                error!("Transition failed, safe to retry: {}", e);
            } else {
                error!("Transition refused: {}", e);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use forge_workflow::core::status::EntityType;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_request_joins_trailing_reason() {
        let actor = Actor::admin("admin-1");
        let request = parse_request(
            &args(&["order", "42", "on_hold", "awaiting", "drawing", "revision"]),
            &actor,
        )
        .unwrap();
        assert_eq!(request.entity_type, EntityType::Order);
        assert_eq!(request.entity_id, 42);
        assert_eq!(request.to_status, "on_hold");
        assert_eq!(request.reason.as_deref(), Some("awaiting drawing revision"));
        assert_eq!(request.actor_id, "admin-1");
    }

    #[test]
    fn test_parse_request_without_reason() {
        let actor = Actor::customer("cust-1");
        let request =
            parse_request(&args(&["vendor_application", "7", "approved"]), &actor).unwrap();
        assert_eq!(request.entity_type, EntityType::VendorApplication);
        assert_eq!(request.reason, None);
    }

    #[test]
    fn test_parse_request_rejects_bad_input() {
        let actor = Actor::admin("admin-1");
        assert!(parse_request(&args(&["order", "42"]), &actor).is_err());
        assert!(parse_request(&args(&["order", "forty-two", "shipped"]), &actor).is_err());
        assert!(parse_request(&args(&["invoice", "1", "paid"]), &actor).is_err());
    }
}
