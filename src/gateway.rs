use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::SubmissionError;
use crate::models::{AnalyticsEvent, SubmittableRecord, Validation, ANALYTICS_COLLECTION};
use crate::store::RecordStore;

/// Validates user-authored records and forwards each one as a single insert.
#[derive(Clone)]
pub struct FormSubmissionGateway {
    store: Arc<dyn RecordStore>,
    analytics_enabled: bool,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl FormSubmissionGateway {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            analytics_enabled: true,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_analytics(mut self, enabled: bool) -> Self {
        self.analytics_enabled = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn validate(&self, record: &SubmittableRecord) -> Validation {
        record.validate()
    }

    /// At most one insert per call, never retried. A failed write is always
    /// reported to the caller.
    pub async fn submit(&self, record: &SubmittableRecord) -> Result<(), SubmissionError> {
        let validation = self.validate(record);
        if !validation.is_valid() {
            tracing::debug!("Refusing invalid {}: {:?}", record.kind(), validation.fields());
            return Err(SubmissionError::Invalid(validation));
        }

        let kind = record.kind();
        if let Err(e) = self.store.insert(kind.collection(), record.to_row()).await {
            tracing::error!("Error submitting {}: {}", kind, e);
            return Err(e.into());
        }

        tracing::info!("Stored {} in {}", kind, kind.collection());

        if self.analytics_enabled {
            self.track_event(&format!("{}_submitted", kind), kind.page());
        }

        Ok(())
    }

    /// Records an analytics event without waiting for it. Failures are only
    /// logged.
    pub fn track_event(&self, event_type: &str, page: &str) {
        let store = self.store.clone();
        let event = AnalyticsEvent::new(event_type, page);

        let handle = tokio::spawn(async move {
            let row = match serde_json::to_value(&event) {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Analytics tracking error: {}", e);
                    return;
                }
            };
            match store.insert(ANALYTICS_COLLECTION, row).await {
                Ok(()) => tracing::debug!("Tracked {} on {}", event.event_type, event.page),
                Err(e) => tracing::warn!("Analytics tracking error: {}", e),
            }
        });

        match self.pending.lock() {
            Ok(mut pending) => {
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
            }
            Err(_) => tracing::warn!("Analytics queue poisoned, event left detached"),
        }
    }

    /// Waits up to `timeout` for analytics events still in flight, so a host
    /// about to exit does not cancel them. Returns whether all of them finished.
    pub async fn flush_analytics(&self, timeout: Duration) -> bool {
        let handles: Vec<JoinHandle<()>> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return false,
        };
        if handles.is_empty() {
            return true;
        }

        let count = handles.len();
        match tokio::time::timeout(timeout, futures::future::join_all(handles)).await {
            Ok(_) => true,
            Err(_) => {
                tracing::warn!("Gave up waiting for {} analytics events", count);
                false
            }
        }
    }
}
