// src/recorder.rs

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::{
    lesson::{LocationReading, Score, content::LESSON_NAME, location::persisted_location_text},
    models::progress::SessionRecord,
    store::{PROGRESS_COLLECTION, ProgressSink},
    utils::jwt::Identity,
};

/// Turns a finished quiz into a progress document and hands it to the sink.
///
/// Nothing is reported back to the learner: a missing identity skips the write,
/// and a failed write is logged and dropped.
#[derive(Clone)]
pub struct SessionRecorder {
    sink: Arc<dyn ProgressSink>,
}

impl SessionRecorder {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self { sink }
    }

    /// Returns the record that was handed off, or `None` when there was no identity.
    pub async fn record(
        &self,
        identity: Option<&Identity>,
        score: Score,
        location: Option<&LocationReading>,
    ) -> Option<SessionRecord> {
        let Some(identity) = identity else {
            tracing::debug!("No identity at submission; progress record skipped");
            return None;
        };

        let record = SessionRecord {
            lesson: LESSON_NAME.to_string(),
            score: i16::from(score.value()),
            timestamp: Utc::now(),
            location: persisted_location_text(location),
        };

        match self.sink.put(identity.as_str(), &record).await {
            Ok(()) => tracing::info!(
                collection = PROGRESS_COLLECTION,
                score = record.score,
                "Progress recorded"
            ),
            Err(e) => tracing::error!(
                collection = PROGRESS_COLLECTION,
                "Failed to write progress record: {}",
                e
            ),
        }

        Some(record)
    }

    /// Fire-and-forget variant of [`SessionRecorder::record`]. The caller may
    /// drop the handle; the write still runs to completion.
    pub fn spawn_record(
        &self,
        identity: Option<Identity>,
        score: Score,
        location: Option<LocationReading>,
    ) -> JoinHandle<Option<SessionRecord>> {
        let recorder = self.clone();
        tokio::spawn(async move {
            recorder
                .record(identity.as_ref(), score, location.as_ref())
                .await
        })
    }
}
