//! Error types for management commands

use mgmt_client::ClientError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// Rejected by validation before anything was sent
    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Transport, setup or usage failure from the client
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The server reported a failed outcome
    #[error("{command} failed: {reason}")]
    Failed { command: String, reason: String },

    /// Server did not come back to `running` after a reload
    #[error("Server did not return to running state within {waited:?} after reload")]
    ReloadTimeout { waited: Duration },

    /// Response envelope lacked data the command relies on
    #[error("Unexpected response: {reason}")]
    UnexpectedResponse { reason: String },
}

pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CommandError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
