//! Workflow error types

use catena_bundle::BundleError;
use catena_core::ModelError;
use catena_keystore::KeystoreError;
use catena_registry::RegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Operator input that cannot be accepted; the same question is asked again
    #[error("{0}")]
    Validation(String),

    /// The console itself failed. Never recovered.
    #[error("Console failure: {0}")]
    Console(#[from] std::io::Error),

    #[error("Node {0} has no chain node id yet. Wait until it is running and try again.")]
    MissingNodeId(String),

    #[error("Unknown blockchain backend: {0}")]
    UnknownBackend(String),

    #[error("No cloud available. Create a cloud first.")]
    NoCloud,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkflowError {
    /// Whether the workflow must stop instead of alerting and carrying on
    pub fn is_fatal(&self) -> bool {
        matches!(self, WorkflowError::Console(_))
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
