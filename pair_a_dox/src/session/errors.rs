//! Session error types.

use thiserror::Error;

use crate::game::errors::ConfigError;
use crate::gateway::GatewayError;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The actor has stopped and drops every request
    #[error("Session is closed")]
    Closed,

    /// Rejected configuration
    #[error("Invalid session configuration: {0}")]
    Config(#[from] ConfigError),

    /// Gateway couldn't be built
    #[error("Best-time gateway unavailable: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
