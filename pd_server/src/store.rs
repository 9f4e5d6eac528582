//! In-memory best-time record.

use chrono::{DateTime, Utc};
use pair_a_dox::{
    entities::Seconds,
    gateway::{BestTime, SubmitOutcome, consider},
};
use serde::Serialize;
use tokio::sync::RwLock;

/// Current record and when it was set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordEntry {
    pub time: Seconds,
    pub set_at: DateTime<Utc>,
}

/// The one record the server keeps. Lower is better; a tie keeps the
/// existing holder.
#[derive(Debug, Default)]
pub struct BestTimeStore {
    record: RwLock<Option<RecordEntry>>,
}

impl BestTimeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a record, e.g. carried over from a previous run
    pub fn with_record(time: Seconds) -> Self {
        Self {
            record: RwLock::new(Some(RecordEntry {
                time,
                set_at: Utc::now(),
            })),
        }
    }

    pub async fn best_time(&self) -> Option<BestTime> {
        self.record
            .read()
            .await
            .map(|entry| BestTime { time: entry.time })
    }

    pub async fn entry(&self) -> Option<RecordEntry> {
        *self.record.read().await
    }

    /// Consider a completion time for the record. Zero is a valid time: a
    /// round finished before the first tick.
    pub async fn submit(&self, time: Seconds) -> SubmitOutcome {
        let mut record = self.record.write().await;
        let current = record.map(|entry| BestTime { time: entry.time });
        let outcome = consider(current, time);
        if outcome.new_record {
            *record = Some(RecordEntry {
                time,
                set_at: Utc::now(),
            });
        }
        outcome
    }
}
