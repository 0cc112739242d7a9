//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use tablehub_booking::{AdminService, BookingService};
use tablehub_core::config::{AdmissionStrategy, AppConfig};
use tablehub_core::types::BoardGameId;
use tablehub_entity::board_game::BoardGame;
use tablehub_entity::reservation::ReservationDocument;
use tablehub_store::StoreManager;
use tablehub_store::memory::{MemoryGameCatalog, MemoryReservationStore};

/// Day every scenario books against.
pub const DAY: &str = "2025-06-01";

/// Test application context
pub struct TestApp {
    /// Booking use cases
    pub booking: BookingService,
    /// Administration
    pub admin: AdminService,
    /// Reservation store, for direct inspection
    pub store: MemoryReservationStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create an app over in-memory stores seeded with the club catalog
    pub fn new(strategy: AdmissionStrategy, reservations: Vec<ReservationDocument>) -> Self {
        let mut config = AppConfig::default();
        config.booking.admission.strategy = strategy;
        Self::with_config(config, reservations)
    }

    /// Create an app with an explicit configuration
    pub fn with_config(config: AppConfig, reservations: Vec<ReservationDocument>) -> Self {
        let store = MemoryReservationStore::with_documents(reservations);
        let catalog = MemoryGameCatalog::with_games(vec![
            game("Catan", 3, 4, 60, 2),
            game("Azul", 2, 4, 45, 1),
        ]);
        let stores = StoreManager::from_parts(Arc::new(store.clone()), Arc::new(catalog));

        Self {
            booking: BookingService::from_config(&stores, &config),
            admin: AdminService::new(&stores, config.store.timeout()),
            store,
            config,
        }
    }

    /// The calendar day tests treat as today
    pub fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }
}

/// Build a catalog entry
pub fn game(name: &str, min: u32, max: u32, duration: u32, stock: u32) -> BoardGame {
    BoardGame {
        id: BoardGameId::new(),
        name: name.to_string(),
        min_players: min,
        max_players: max,
        duration_minutes: duration,
        stock,
    }
}

/// A stored document with a time and duration
pub fn doc(game: &str, day: &str, time: &str, duration: Option<i64>) -> ReservationDocument {
    ReservationDocument {
        user_id: Some("seed".to_string()),
        game: Some(game.to_string()),
        players: Some(2),
        day: Some(day.to_string()),
        time: Some(time.to_string()),
        duration_minutes: duration,
        ..ReservationDocument::default()
    }
}
