use std::sync::Arc;

use crate::error::Result;
use crate::models::{RecordKind, StoredTestimonial};
use crate::store::RecordStore;

/// Read side of the testimonial wall.
pub struct TestimonialFeed {
    store: Arc<dyn RecordStore>,
    limit: Option<u32>,
}

impl TestimonialFeed {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store, limit: None }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Newest first. Any failure yields an empty wall.
    pub async fn load(&self) -> Vec<StoredTestimonial> {
        match self.try_load().await {
            Ok(testimonials) => {
                tracing::info!("Loaded {} testimonials", testimonials.len());
                testimonials
            }
            Err(e) => {
                tracing::warn!("Error loading testimonials: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_load(&self) -> Result<Vec<StoredTestimonial>> {
        let rows = self
            .store
            .select_recent(RecordKind::Testimonial.collection(), "created_at", self.limit)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::debug!("Skipping malformed testimonial row: {}", e);
                    None
                }
            })
            .collect())
    }
}
