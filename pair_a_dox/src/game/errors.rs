//! Game error types.

use thiserror::Error;

/// Rejected board or session configuration.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// A board needs at least one face
    #[error("face list is empty")]
    NoFaces,

    /// Every face must be unique or a pair would have four cards
    #[error("duplicate face identifier: {0}")]
    DuplicateFace(String),

    /// Face identifiers can't be blank
    #[error("blank face identifier at position {0}")]
    BlankFace(usize),

    /// Catch-all for invalid numeric settings
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;
