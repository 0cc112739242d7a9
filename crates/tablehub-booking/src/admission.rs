//! Admission control: availability check bound to the reservation write.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use tablehub_core::config::AdmissionStrategy;
use tablehub_core::result::AppResult;
use tablehub_core::types::UserId;
use tablehub_entity::reservation::{Admission, AvailabilityQuery, Rejection, Reservation};
use tablehub_store::traits::{CapacityOutcome, ReservationStore};

use crate::checker::AvailabilityChecker;
use crate::lock::KeyedLock;
use crate::timeout::within;

/// Admits or rejects reservation requests without over-booking.
///
/// With [`AdmissionStrategy::Conditional`] the store re-counts overlaps
/// atomically with the insert. With [`AdmissionStrategy::Serialized`] a
/// per-`(resource, day)` lock is held across the read and the write, which
/// only protects requests handled by this process.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    /// Availability checker over the same store.
    checker: AvailabilityChecker,
    /// Reservation store.
    store: Arc<dyn ReservationStore>,
    /// How check and write are bound together.
    strategy: AdmissionStrategy,
    /// Per `(resource, day)` locks for the serialized strategy.
    locks: Arc<KeyedLock>,
    /// Deadline for one store round-trip.
    timeout: Duration,
}

impl AdmissionController {
    /// Creates a new admission controller.
    pub fn new(
        store: Arc<dyn ReservationStore>,
        strategy: AdmissionStrategy,
        timeout: Duration,
    ) -> Self {
        Self {
            checker: AvailabilityChecker::new(Arc::clone(&store), timeout),
            store,
            strategy,
            locks: Arc::new(KeyedLock::new()),
            timeout,
        }
    }

    /// The checker used for the optimistic read.
    pub fn checker(&self) -> &AvailabilityChecker {
        &self.checker
    }

    /// The configured strategy.
    pub fn strategy(&self) -> AdmissionStrategy {
        self.strategy
    }

    /// Admit a booking of `resource_id` on `day` at `start` for
    /// `duration_minutes` if fewer than `stock` stored bookings overlap it.
    ///
    /// Returns the stored reservation, or a "no capacity" rejection when the
    /// slot is full, including when a concurrent request filled it between
    /// the check and the write.
    #[allow(clippy::too_many_arguments)]
    pub async fn admit_reservation(
        &self,
        resource_id: &str,
        day: &str,
        start: &str,
        duration_minutes: u32,
        stock: u32,
        user_id: UserId,
        players: u32,
    ) -> AppResult<Admission> {
        let query = AvailabilityQuery::parse(resource_id, day, start, duration_minutes, stock)?;
        self.admit(&query, user_id, players).await
    }

    /// Typed form of [`admit_reservation`](Self::admit_reservation).
    pub async fn admit(
        &self,
        query: &AvailabilityQuery,
        user_id: UserId,
        players: u32,
    ) -> AppResult<Admission> {
        let reservation = Reservation::new(
            user_id,
            query.resource_id.as_str(),
            players,
            query.start,
            query.day,
            Some(query.duration_minutes),
        );

        match self.strategy {
            AdmissionStrategy::Conditional => self.admit_conditional(query, reservation).await,
            AdmissionStrategy::Serialized => self.admit_serialized(query, reservation).await,
        }
    }

    /// Store a reservation without any capacity check.
    pub async fn record(&self, reservation: Reservation) -> AppResult<Admission> {
        within(self.timeout, "write", self.store.append(&reservation)).await?;
        info!(
            id = %reservation.id,
            resource_id = %reservation.resource_id,
            day = %reservation.day,
            time = %reservation.time,
            "Reservation recorded without capacity check"
        );
        Ok(Admission::Admitted(reservation))
    }

    async fn admit_conditional(
        &self,
        query: &AvailabilityQuery,
        reservation: Reservation,
    ) -> AppResult<Admission> {
        let overlapping = self.checker.overlapping(query).await?;
        if overlapping >= query.stock {
            return Ok(reject(query, overlapping));
        }

        let outcome = within(
            self.timeout,
            "write",
            self.store.append_within_capacity(&reservation, query.window(), query.stock),
        )
        .await?;

        match outcome {
            CapacityOutcome::Appended => Ok(admitted(reservation, overlapping, query.stock)),
            CapacityOutcome::Full { overlapping } => {
                warn!(
                    resource_id = %query.resource_id,
                    day = %query.day,
                    time = %query.start,
                    overlapping = overlapping,
                    stock = query.stock,
                    "Slot filled by a concurrent booking before commit"
                );
                Ok(Admission::Rejected(Rejection::no_capacity(
                    overlapping,
                    query.stock,
                )))
            }
        }
    }

    async fn admit_serialized(
        &self,
        query: &AvailabilityQuery,
        reservation: Reservation,
    ) -> AppResult<Admission> {
        let _guard = self
            .locks
            .lock(&format!("{}:{}", query.resource_id, query.day_key()))
            .await;

        let overlapping = self.checker.overlapping(query).await?;
        if overlapping >= query.stock {
            return Ok(reject(query, overlapping));
        }

        within(self.timeout, "write", self.store.append(&reservation)).await?;
        Ok(admitted(reservation, overlapping, query.stock))
    }
}

fn reject(query: &AvailabilityQuery, overlapping: u32) -> Admission {
    warn!(
        resource_id = %query.resource_id,
        day = %query.day,
        time = %query.start,
        overlapping = overlapping,
        stock = query.stock,
        "Reservation rejected: no capacity"
    );
    Admission::Rejected(Rejection::no_capacity(overlapping, query.stock))
}

fn admitted(reservation: Reservation, overlapping: u32, stock: u32) -> Admission {
    info!(
        id = %reservation.id,
        user_id = %reservation.user_id,
        resource_id = %reservation.resource_id,
        day = %reservation.day,
        time = %reservation.time,
        players = reservation.players,
        overlapping = overlapping,
        stock = stock,
        "Reservation admitted"
    );
    Admission::Admitted(reservation)
}
