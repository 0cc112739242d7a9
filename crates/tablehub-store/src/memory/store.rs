//! In-memory reservation store using a Tokio lock.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use tablehub_core::result::AppResult;
use tablehub_core::types::{ReservationId, SlotWindow};
use tablehub_entity::reservation::{Reservation, ReservationDocument, count_overlaps};

use crate::traits::{CapacityOutcome, ReservationStore};

/// In-memory reservation store.
///
/// Suitable for single-node deployments and tests. A capacity-checked
/// append counts overlaps and inserts under one write guard, so it cannot
/// interleave with another append.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationStore {
    /// Stored documents in insertion order.
    documents: Arc<RwLock<Vec<ReservationDocument>>>,
}

impl MemoryReservationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing documents.
    pub fn with_documents(documents: Vec<ReservationDocument>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    /// Copy of every stored document, in insertion order.
    pub async fn snapshot(&self) -> Vec<ReservationDocument> {
        self.documents.read().await.clone()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn find_by_resource_day(
        &self,
        resource_id: &str,
        day: &str,
    ) -> AppResult<Vec<ReservationDocument>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| doc.matches(resource_id, day))
            .cloned()
            .collect())
    }

    async fn append(&self, reservation: &Reservation) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        documents.push(reservation.to_document());
        debug!(id = %reservation.id, total = documents.len(), "Reservation appended");
        Ok(())
    }

    async fn append_within_capacity(
        &self,
        reservation: &Reservation,
        window: SlotWindow,
        stock: u32,
    ) -> AppResult<CapacityOutcome> {
        let mut documents = self.documents.write().await;

        let resource_id = reservation.resource_id.as_str();
        let day = reservation.day.format("%Y-%m-%d").to_string();
        let overlapping = count_overlaps(
            &window,
            documents.iter().filter(|doc| doc.matches(resource_id, &day)),
        );

        if overlapping >= stock {
            return Ok(CapacityOutcome::Full { overlapping });
        }

        documents.push(reservation.to_document());
        debug!(
            id = %reservation.id,
            resource_id = %resource_id,
            day = %day,
            overlapping = overlapping,
            stock = stock,
            "Reservation appended within capacity"
        );
        Ok(CapacityOutcome::Appended)
    }

    async fn list_all(&self) -> AppResult<Vec<ReservationDocument>> {
        Ok(self.snapshot().await)
    }

    async fn delete(&self, id: &ReservationId) -> AppResult<bool> {
        let mut documents = self.documents.write().await;
        let raw_id = id.to_string();
        let before = documents.len();
        documents.retain(|doc| doc.id.as_deref() != Some(raw_id.as_str()));

        let removed = documents.len() < before;
        if removed {
            info!(id = %id, "Reservation deleted");
        }
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
