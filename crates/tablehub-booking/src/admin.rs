//! Catalog and reservation administration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use validator::Validate;

use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::{BoardGameId, ReservationId};
use tablehub_entity::board_game::{BoardGame, NewBoardGame};
use tablehub_entity::reservation::Reservation;
use tablehub_store::StoreManager;
use tablehub_store::traits::{GameCatalog, ReservationStore};

use crate::timeout::within;

/// Administrative operations on the game catalog and stored reservations.
#[derive(Debug, Clone)]
pub struct AdminService {
    /// Game catalog.
    catalog: Arc<dyn GameCatalog>,
    /// Reservation store.
    reservations: Arc<dyn ReservationStore>,
    /// Deadline for one store round-trip.
    timeout: Duration,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(stores: &StoreManager, timeout: Duration) -> Self {
        Self {
            catalog: stores.catalog(),
            reservations: stores.reservations(),
            timeout,
        }
    }

    /// All games, sorted by name.
    pub async fn list_games(&self) -> AppResult<Vec<BoardGame>> {
        within(self.timeout, "read", self.catalog.list()).await
    }

    /// Validate and add a game to the catalog.
    pub async fn add_game(&self, input: NewBoardGame) -> AppResult<BoardGame> {
        input.validate()?;
        let game = input.into_board_game();
        within(self.timeout, "write", self.catalog.insert(&game)).await?;
        Ok(game)
    }

    /// Remove a game from the catalog.
    ///
    /// Existing reservations for the game are kept.
    pub async fn remove_game(&self, id: &BoardGameId) -> AppResult<()> {
        if !within(self.timeout, "write", self.catalog.remove(id)).await? {
            return Err(AppError::not_found(format!("Game {id} not found")));
        }
        info!(id = %id, "Board game removed");
        Ok(())
    }

    /// Change how many copies of a game can be booked concurrently.
    pub async fn update_stock(&self, id: &BoardGameId, stock: u32) -> AppResult<BoardGame> {
        within(self.timeout, "write", self.catalog.update_stock(id, stock))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Game {id} not found")))
    }

    /// Every stored reservation that decodes completely.
    pub async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        let documents = within(self.timeout, "read", self.reservations.list_all()).await?;
        let mut reservations: Vec<Reservation> = documents
            .iter()
            .filter_map(|doc| doc.to_reservation())
            .collect();
        reservations.sort_by(|a, b| (a.day, a.time).cmp(&(b.day, b.time)));
        Ok(reservations)
    }

    /// Delete a stored reservation.
    pub async fn delete_reservation(&self, id: &ReservationId) -> AppResult<()> {
        if !within(self.timeout, "write", self.reservations.delete(id)).await? {
            return Err(AppError::not_found(format!("Reservation {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tablehub_core::error::ErrorKind;
    use tablehub_core::types::{TimeOfDay, UserId};
    use tablehub_store::memory::MemoryReservationStore;

    use crate::test_support::doc;

    fn new_game(name: &str, min: u32, max: u32) -> NewBoardGame {
        NewBoardGame {
            name: name.to_string(),
            min_players: min,
            max_players: max,
            duration_minutes: 45,
            stock: 1,
        }
    }

    fn admin(store: MemoryReservationStore) -> AdminService {
        let stores = StoreManager::from_parts(
            Arc::new(store),
            Arc::new(tablehub_store::memory::MemoryGameCatalog::new()),
        );
        AdminService::new(&stores, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_add_update_remove_game() {
        let admin = admin(MemoryReservationStore::new());

        let azul = admin.add_game(new_game("  Azul ", 2, 4)).await.unwrap();
        assert_eq!(azul.name, "Azul");

        let updated = admin.update_stock(&azul.id, 3).await.unwrap();
        assert_eq!(updated.stock, 3);
        assert_eq!(admin.list_games().await.unwrap()[0].stock, 3);

        admin.remove_game(&azul.id).await.unwrap();
        let err = admin.remove_game(&azul.id).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_game_is_rejected() {
        let admin = admin(MemoryReservationStore::new());
        let err = admin.add_game(new_game("Azul", 5, 2)).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(admin.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_reservations_drops_partial_documents() {
        let reservation = Reservation::new(
            UserId::new("alice"),
            "Catan",
            3,
            TimeOfDay::from_hm(15, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            Some(60),
        );
        let store = MemoryReservationStore::with_documents(vec![
            reservation.to_document(),
            doc("Catan", "2025-06-01", "14:00", 60),
        ]);
        let admin = admin(store);

        let listed = admin.list_reservations().await.unwrap();
        assert_eq!(listed, vec![reservation.clone()]);

        admin.delete_reservation(&reservation.id).await.unwrap();
        assert!(admin.list_reservations().await.unwrap().is_empty());
        assert!(admin.delete_reservation(&reservation.id).await.is_err());
    }
}
