//! Store traits implemented by every backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tablehub_core::result::AppResult;
use tablehub_core::types::{BoardGameId, ReservationId, SlotWindow};
use tablehub_entity::board_game::BoardGame;
use tablehub_entity::reservation::{Reservation, ReservationDocument};

/// Result of a capacity-checked append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityOutcome {
    /// The reservation was written.
    Appended,
    /// The slot was full at commit time; nothing was written.
    Full {
        /// Overlapping reservations counted at commit time.
        overlapping: u32,
    },
}

/// Persistent record-keeper for reservations.
///
/// Reads match `(resource_id, day)` by exact string equality. Records are
/// appended, never updated in place.
#[async_trait]
pub trait ReservationStore: Send + Sync + std::fmt::Debug + 'static {
    /// All documents for the given resource and day.
    ///
    /// Documents with missing or malformed fields are still returned;
    /// documents the backend cannot decode at all are dropped.
    async fn find_by_resource_day(
        &self,
        resource_id: &str,
        day: &str,
    ) -> AppResult<Vec<ReservationDocument>>;

    /// Append a reservation unconditionally.
    async fn append(&self, reservation: &Reservation) -> AppResult<()>;

    /// Append a reservation only if fewer than `stock` existing records for
    /// the same resource and day overlap `window`.
    ///
    /// The count and the insert happen atomically with respect to other
    /// appends for the same resource and day.
    async fn append_within_capacity(
        &self,
        reservation: &Reservation,
        window: SlotWindow,
        stock: u32,
    ) -> AppResult<CapacityOutcome>;

    /// Every stored document.
    async fn list_all(&self) -> AppResult<Vec<ReservationDocument>>;

    /// Delete a reservation by id. Returns `true` if a record was removed.
    async fn delete(&self, id: &ReservationId) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Board game catalog.
#[async_trait]
pub trait GameCatalog: Send + Sync + std::fmt::Debug + 'static {
    /// Look up a game by its exact name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<BoardGame>>;

    /// All games, sorted by name.
    async fn list(&self) -> AppResult<Vec<BoardGame>>;

    /// Add a game. Fails with a conflict if the name is already taken.
    async fn insert(&self, game: &BoardGame) -> AppResult<()>;

    /// Remove a game by id. Returns `true` if a game was removed.
    async fn remove(&self, id: &BoardGameId) -> AppResult<bool>;

    /// Set the stock of a game. Returns the updated game, or `None` if the
    /// id is unknown.
    async fn update_stock(&self, id: &BoardGameId, stock: u32) -> AppResult<Option<BoardGame>>;
}
