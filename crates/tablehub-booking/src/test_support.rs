//! Store doubles shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::{ReservationId, SlotWindow};
use tablehub_entity::reservation::{Reservation, ReservationDocument};
use tablehub_store::memory::MemoryReservationStore;
use tablehub_store::traits::{CapacityOutcome, ReservationStore};

/// A stored document as the booking front end writes it.
pub(crate) fn doc(game: &str, day: &str, time: &str, duration: i64) -> ReservationDocument {
    ReservationDocument {
        game: Some(game.to_string()),
        day: Some(day.to_string()),
        time: Some(time.to_string()),
        duration_minutes: Some(duration),
        ..ReservationDocument::default()
    }
}

/// How a [`ScriptedStore`] misbehaves.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Fault {
    /// Behave like the wrapped memory store.
    None,
    /// Sleep before every operation.
    Slow(Duration),
    /// Fail reads with a query error and writes with a write error.
    Fail,
    /// Serve reads, fail every write with a write error.
    FailWrites,
}

/// Memory store wrapper that counts calls and can inject faults.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedStore {
    pub(crate) inner: MemoryReservationStore,
    fault: Fault,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStore {
    pub(crate) fn new(documents: Vec<ReservationDocument>, fault: Fault) -> Self {
        Self {
            inner: MemoryReservationStore::with_documents(documents),
            fault,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Fault::Slow(delay) = self.fault {
            tokio::time::sleep(delay).await;
        }
    }

    fn failing(&self) -> bool {
        matches!(self.fault, Fault::Fail)
    }

    fn failing_writes(&self) -> bool {
        matches!(self.fault, Fault::Fail | Fault::FailWrites)
    }
}

#[async_trait]
impl ReservationStore for ScriptedStore {
    async fn find_by_resource_day(
        &self,
        resource_id: &str,
        day: &str,
    ) -> AppResult<Vec<ReservationDocument>> {
        self.enter().await;
        if self.failing() {
            return Err(AppError::query("connection reset"));
        }
        self.inner.find_by_resource_day(resource_id, day).await
    }

    async fn append(&self, reservation: &Reservation) -> AppResult<()> {
        self.enter().await;
        if self.failing_writes() {
            return Err(AppError::write("connection reset"));
        }
        self.inner.append(reservation).await
    }

    async fn append_within_capacity(
        &self,
        reservation: &Reservation,
        window: SlotWindow,
        stock: u32,
    ) -> AppResult<CapacityOutcome> {
        self.enter().await;
        if self.failing_writes() {
            return Err(AppError::write("connection reset"));
        }
        self.inner
            .append_within_capacity(reservation, window, stock)
            .await
    }

    async fn list_all(&self) -> AppResult<Vec<ReservationDocument>> {
        self.enter().await;
        self.inner.list_all().await
    }

    async fn delete(&self, id: &ReservationId) -> AppResult<bool> {
        self.enter().await;
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing())
    }
}
