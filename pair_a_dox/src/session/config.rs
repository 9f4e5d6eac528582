//! Session configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{
    constants::{DEFAULT_FACE_IDS, DEFAULT_REVEAL_DELAY, DEFAULT_TICK_PERIOD},
    entities::{FaceId, validate_faces},
    errors::{ConfigError, ConfigResult},
};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for one game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Faces dealt every round (each appears twice)
    pub face_ids: Vec<FaceId>,

    /// How long a mismatched pair stays visible, in milliseconds
    pub reveal_delay_ms: u64,

    /// Solo timer period, in milliseconds
    pub tick_period_ms: u64,

    /// Base URL of the best-time server
    pub gateway_url: String,

    /// Per-request timeout for the best-time server, in milliseconds
    pub request_timeout_ms: u64,

    /// Fixed shuffle seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            face_ids: DEFAULT_FACE_IDS.iter().map(|f| FaceId::new(f)).collect(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY.as_millis() as u64,
            tick_period_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT.as_millis() as u64,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        validate_faces(&self.face_ids)?;

        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_period_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        if !(self.gateway_url.starts_with("http://") || self.gateway_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                field: "gateway_url",
                reason: format!("expected an http(s) URL, got '{}'", self.gateway_url),
            });
        }

        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
