//! HTTP client for the best-time server.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::{
    BestTime, BestTimeGateway, GatewayError, GatewayResult, SubmitOutcome, SubmitRequest,
};
use crate::game::entities::Seconds;

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Gateway backed by `GET`/`POST {base_url}/highscore`
#[derive(Clone, Debug)]
pub struct HttpBestTimeGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBestTimeGateway {
    /// Create a gateway without a request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a gateway whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn highscore_url(&self) -> String {
        format!("{}/highscore", self.base_url.trim_end_matches('/'))
    }
}

async fn error_for_status(response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
    GatewayError::Status { status, body }
}

#[async_trait]
impl BestTimeGateway for HttpBestTimeGateway {
    async fn fetch_best_time(&self) -> GatewayResult<Option<BestTime>> {
        let response = self.client.get(self.highscore_url()).send().await?;

        // Some stores answer "no record yet" with 404 instead of null.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let best: Option<BestTime> = response.json().await?;
        Ok(best)
    }

    async fn submit_time(&self, elapsed_seconds: Seconds) -> GatewayResult<SubmitOutcome> {
        let request = SubmitRequest {
            time: elapsed_seconds,
        };

        let response = self
            .client
            .post(self.highscore_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let outcome: SubmitOutcome = response.json().await?;
        Ok(outcome)
    }
}
