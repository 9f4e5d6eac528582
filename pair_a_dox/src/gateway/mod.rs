//! Best-time gateway.
//!
//! The game keeps a single global record (lowest solo time). The store
//! behind it is remote; the game only needs to read the record once at
//! start-up and submit one candidate per finished solo round.
//!
//! Adapters:
//! - [`HttpBestTimeGateway`]: talks to a best-time server over HTTP
//! - [`InMemoryBestTimeGateway`]: process-local record, used offline and in tests

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::entities::Seconds;

pub use http::HttpBestTimeGateway;
pub use memory::InMemoryBestTimeGateway;

/// The stored record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BestTime {
    pub time: Seconds,
}

/// Answer to a submitted time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub new_record: bool,
    /// Record after the submission was considered.
    pub highscore: BestTime,
}

/// Candidate submitted to the store.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubmitRequest {
    pub time: Seconds,
}

/// Gateway errors. None of these ever interrupt a game.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remote best-time store
#[async_trait]
pub trait BestTimeGateway: Send + Sync {
    /// Current record, `None` when nobody has finished a solo round yet.
    async fn fetch_best_time(&self) -> GatewayResult<Option<BestTime>>;

    /// Offers a finished round's time.
    async fn submit_time(&self, elapsed_seconds: Seconds) -> GatewayResult<SubmitOutcome>;
}

/// Shared record-keeping rule: lower is better, ties don't count.
pub fn consider(current: Option<BestTime>, candidate: Seconds) -> SubmitOutcome {
    match current {
        Some(best) if best.time <= candidate => SubmitOutcome {
            new_record: false,
            highscore: best,
        },
        _ => SubmitOutcome {
            new_record: true,
            highscore: BestTime { time: candidate },
        },
    }
}
