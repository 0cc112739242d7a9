//! Transient availability query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::{SlotWindow, TimeOfDay, parse_day};

/// One availability question: can `resource_id` take another booking
/// starting at `start` on `day` for `duration_minutes`, given `stock`
/// interchangeable copies?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Game name or table resource id.
    pub resource_id: String,
    /// Requested day.
    pub day: NaiveDate,
    /// Requested start.
    pub start: TimeOfDay,
    /// Requested length.
    pub duration_minutes: u32,
    /// Concurrent bookings the resource can hold.
    pub stock: u32,
}

impl AvailabilityQuery {
    /// Build a query from caller-supplied strings.
    ///
    /// The day and start time are parsed strictly; a malformed value is a
    /// parse failure. An empty resource id or a duration outside one to
    /// 1440 minutes is a validation failure.
    pub fn parse(
        resource_id: &str,
        day: &str,
        start: &str,
        duration_minutes: u32,
        stock: u32,
    ) -> AppResult<Self> {
        let start = TimeOfDay::parse(start)?;
        let day = parse_day(day)?;
        Self::new(resource_id, day, start, duration_minutes, stock)
    }

    /// Build a query from typed values.
    pub fn new(
        resource_id: &str,
        day: NaiveDate,
        start: TimeOfDay,
        duration_minutes: u32,
        stock: u32,
    ) -> AppResult<Self> {
        if resource_id.is_empty() {
            return Err(AppError::validation("Resource id must not be empty"));
        }
        if duration_minutes == 0 {
            return Err(AppError::validation("Duration must be positive"));
        }
        if !SlotWindow::is_valid_duration(duration_minutes) {
            return Err(AppError::validation(format!(
                "Duration must be at most {} minutes",
                SlotWindow::MAX_DURATION_MINUTES
            )));
        }

        Ok(Self {
            resource_id: resource_id.to_string(),
            day,
            start,
            duration_minutes,
            stock,
        })
    }

    /// Requested window.
    pub fn window(&self) -> SlotWindow {
        SlotWindow::new(self.start, self.duration_minutes)
    }

    /// Day in the exact string form stores match on.
    pub fn day_key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}
