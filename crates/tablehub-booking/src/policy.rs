//! Booking rules checked before admission.

use chrono::{Days, NaiveDate};

use tablehub_core::config::BookingConfig;
use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::TimeOfDay;
use tablehub_entity::board_game::BoardGame;

/// Player count, booking horizon and start slot rules.
#[derive(Debug, Clone)]
pub struct BookingPolicy {
    config: BookingConfig,
}

impl BookingPolicy {
    /// Creates a policy from booking configuration.
    pub fn new(config: BookingConfig) -> Self {
        Self { config }
    }

    /// The underlying configuration.
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// The player count must fall within the game's range.
    pub fn validate_players(&self, game: &BoardGame, players: u32) -> AppResult<()> {
        if game.accepts_players(players) {
            return Ok(());
        }
        Err(AppError::validation(format!(
            "{} is played by {} to {} players, not {players}",
            game.name, game.min_players, game.max_players
        )))
    }

    /// A table booking needs at least one player.
    pub fn validate_table_players(&self, players: u32) -> AppResult<()> {
        if players == 0 {
            return Err(AppError::validation("A table booking needs at least one player"));
        }
        Ok(())
    }

    /// `day` must lie between `today` and the booking horizon, both inclusive.
    pub fn validate_day(&self, day: NaiveDate, today: NaiveDate) -> AppResult<()> {
        let last = self.last_bookable_day(today);
        if day < today {
            return Err(AppError::validation(format!("{day} is in the past")));
        }
        if day > last {
            return Err(AppError::validation(format!(
                "{day} is beyond the booking horizon ({last})"
            )));
        }
        Ok(())
    }

    /// `time` must be one of [`time_slots`](Self::time_slots).
    pub fn validate_slot(&self, time: TimeOfDay) -> AppResult<()> {
        let opening = self.config.opening.minutes();
        let interval = self.config.slot_interval_minutes.max(1);
        let minutes = time.minutes();

        let on_grid = minutes >= opening && (minutes - opening) % interval == 0;
        if on_grid && time <= self.config.last_slot {
            return Ok(());
        }
        Err(AppError::validation(format!(
            "{time} is not a bookable start time ({} to {} every {interval} minutes)",
            self.config.opening, self.config.last_slot
        )))
    }

    /// Bookable start times, from opening to the last slot.
    pub fn time_slots(&self) -> Vec<TimeOfDay> {
        let interval = self.config.slot_interval_minutes.max(1) as usize;
        let last = self.config.last_slot.minutes();
        (self.config.opening.minutes()..=last)
            .step_by(interval)
            .filter_map(TimeOfDay::from_minutes)
            .collect()
    }

    fn last_bookable_day(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.config.horizon_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}
