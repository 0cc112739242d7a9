//! Booking use cases: games, plain tables and availability hints.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::info;

use tablehub_core::config::AppConfig;
use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::{TimeOfDay, UserId, parse_day};
use tablehub_entity::board_game::BoardGame;
use tablehub_entity::reservation::{Admission, AvailabilityQuery, Reservation};
use tablehub_store::StoreManager;
use tablehub_store::traits::GameCatalog;

use crate::admission::AdmissionController;
use crate::policy::BookingPolicy;
use crate::timeout::within;

/// Places reservations for games and tables.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Game catalog.
    catalog: Arc<dyn GameCatalog>,
    /// Admission controller over the reservation store.
    admission: AdmissionController,
    /// Booking rules.
    policy: BookingPolicy,
    /// Deadline for one catalog round-trip.
    timeout: Duration,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        catalog: Arc<dyn GameCatalog>,
        admission: AdmissionController,
        policy: BookingPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            admission,
            policy,
            timeout,
        }
    }

    /// Wires a service over `stores` using application configuration.
    pub fn from_config(stores: &StoreManager, config: &AppConfig) -> Self {
        let timeout = config.store.timeout();
        let admission = AdmissionController::new(
            stores.reservations(),
            config.booking.admission.strategy,
            timeout,
        );
        Self::new(
            stores.catalog(),
            admission,
            BookingPolicy::new(config.booking.clone()),
            timeout,
        )
    }

    /// Booking rules in force.
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Book `players` seats at `game_name` on `day` at `time`, relative to the
    /// local calendar day.
    pub async fn book_game(
        &self,
        user_id: UserId,
        game_name: &str,
        players: u32,
        day: &str,
        time: &str,
    ) -> AppResult<Admission> {
        self.book_game_on(today(), user_id, game_name, players, day, time).await
    }

    /// [`book_game`](Self::book_game) with an explicit `today`.
    pub async fn book_game_on(
        &self,
        today: NaiveDate,
        user_id: UserId,
        game_name: &str,
        players: u32,
        day: &str,
        time: &str,
    ) -> AppResult<Admission> {
        let (day, start) = parse_request(day, time)?;
        let game = self.find_game(game_name).await?;

        self.policy.validate_players(&game, players)?;
        self.policy.validate_day(day, today)?;
        self.policy.validate_slot(start)?;

        let query =
            AvailabilityQuery::new(&game.name, day, start, game.duration_minutes, game.stock)?;
        self.admission.admit(&query, user_id, players).await
    }

    /// Book a table without a game, relative to the local calendar day.
    pub async fn book_table(
        &self,
        user_id: UserId,
        players: u32,
        day: &str,
        time: &str,
    ) -> AppResult<Admission> {
        self.book_table_on(today(), user_id, players, day, time).await
    }

    /// [`book_table`](Self::book_table) with an explicit `today`.
    ///
    /// Without a configured table capacity every valid request is stored.
    pub async fn book_table_on(
        &self,
        today: NaiveDate,
        user_id: UserId,
        players: u32,
        day: &str,
        time: &str,
    ) -> AppResult<Admission> {
        let (day, start) = parse_request(day, time)?;

        self.policy.validate_table_players(players)?;
        self.policy.validate_day(day, today)?;
        self.policy.validate_slot(start)?;

        let table = &self.policy.config().table;
        match table.capacity {
            Some(capacity) => {
                let query = AvailabilityQuery::new(
                    &table.resource_id,
                    day,
                    start,
                    table.duration_minutes,
                    capacity,
                )?;
                self.admission.admit(&query, user_id, players).await
            }
            None => {
                let reservation = Reservation::new(
                    user_id,
                    table.resource_id.as_str(),
                    players,
                    start,
                    day,
                    None,
                );
                self.admission.record(reservation).await
            }
        }
    }

    /// Whether `game_name` has a free copy on `day` at `time`.
    pub async fn availability(&self, game_name: &str, day: &str, time: &str) -> AppResult<bool> {
        let (day, start) = parse_request(day, time)?;
        let game = self.find_game(game_name).await?;

        let query =
            AvailabilityQuery::new(&game.name, day, start, game.duration_minutes, game.stock)?;
        let available = self.admission.checker().check(&query).await?;
        info!(
            game = %game.name,
            day = %day,
            time = %start,
            available = available,
            "Availability checked"
        );
        Ok(available)
    }

    async fn find_game(&self, name: &str) -> AppResult<BoardGame> {
        within(self.timeout, "read", self.catalog.find_by_name(name))
            .await?
            .ok_or_else(|| AppError::not_found(format!("No game named '{name}'")))
    }
}

/// Parse the time first so a malformed time is reported even when the day is
/// also malformed.
fn parse_request(day: &str, time: &str) -> AppResult<(NaiveDate, TimeOfDay)> {
    let start = TimeOfDay::parse(time)?;
    let day = parse_day(day)?;
    Ok((day, start))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
