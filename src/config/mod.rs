/// Database configuration and connection management
pub mod database;

/// Workflow behaviour loaded from workflow.toml
pub mod workflow;

/// Acting user resolved from environment variables
pub mod actor;
