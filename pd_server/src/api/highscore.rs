//! Best-time API handlers.
//!
//! # Examples
//!
//! Read the record:
//! ```bash
//! curl http://localhost:3000/highscore
//! # {"time":42}  or  null
//! ```
//!
//! Submit a completion time:
//! ```bash
//! curl -X POST http://localhost:3000/highscore \
//!   -H "Content-Type: application/json" \
//!   -d '{"time": 37}'
//! # {"newRecord":true,"highscore":{"time":37}}
//! ```

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use pair_a_dox::gateway::{BestTime, SubmitOutcome, SubmitRequest};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::{logging, metrics};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /highscore`
pub async fn get_highscore(State(state): State<AppState>) -> Json<Option<BestTime>> {
    Json(state.store.best_time().await)
}

/// `POST /highscore`
///
/// Any whole number of seconds is accepted, zero included. Bodies whose
/// `time` is not an unsigned 32-bit integer are answered with the
/// extractor's status and an `ErrorResponse`.
pub async fn submit_highscore(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitOutcome>, (StatusCode, Json<ErrorResponse>)> {
    let Json(payload) = payload.map_err(|rejection| {
        metrics::submissions_rejected_total();
        tracing::debug!("Rejected submission: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    let previous = state.store.best_time().await.map(|b| b.time);
    let outcome = state.store.submit(payload.time).await;

    metrics::submissions_total();
    metrics::submitted_time_seconds(payload.time);
    if outcome.new_record {
        metrics::new_records_total();
        metrics::best_time_seconds(outcome.highscore.time);
        logging::log_new_record(previous, outcome.highscore.time);
    }
    Ok(Json(outcome))
}
