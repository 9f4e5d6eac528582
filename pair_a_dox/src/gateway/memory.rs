//! Process-local best-time store.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{BestTime, BestTimeGateway, GatewayError, GatewayResult, SubmitOutcome, consider};
use crate::game::entities::Seconds;

/// Keeps the record in memory and remembers every submission.
#[derive(Debug, Default)]
pub struct InMemoryBestTimeGateway {
    record: Mutex<Option<BestTime>>,
    submissions: Mutex<Vec<Seconds>>,
    offline: AtomicBool,
}

impl InMemoryBestTimeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(time: Seconds) -> Self {
        Self {
            record: Mutex::new(Some(BestTime { time })),
            ..Self::default()
        }
    }

    /// Makes every call fail with a transport error until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn record(&self) -> Option<BestTime> {
        *self.record.lock().await
    }

    /// Every time offered so far, oldest first.
    pub async fn submissions(&self) -> Vec<Seconds> {
        self.submissions.lock().await.clone()
    }

    fn check_online(&self) -> GatewayResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BestTimeGateway for InMemoryBestTimeGateway {
    async fn fetch_best_time(&self) -> GatewayResult<Option<BestTime>> {
        self.check_online()?;
        Ok(*self.record.lock().await)
    }

    async fn submit_time(&self, elapsed_seconds: Seconds) -> GatewayResult<SubmitOutcome> {
        self.check_online()?;
        self.submissions.lock().await.push(elapsed_seconds);

        let mut record = self.record.lock().await;
        let outcome = consider(*record, elapsed_seconds);
        if outcome.new_record {
            *record = Some(outcome.highscore);
        }
        Ok(outcome)
    }
}
