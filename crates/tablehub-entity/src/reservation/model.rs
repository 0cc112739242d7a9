//! Reservation entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tablehub_core::types::{ReservationId, SlotWindow, TimeOfDay, UserId};

use super::document::ReservationDocument;

/// An admitted reservation of a game, or of a plain table.
///
/// Created once by an admission decision and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Store record id.
    pub id: ReservationId,
    /// User who placed the reservation.
    pub user_id: UserId,
    /// Game name, or the table resource id for plain table bookings.
    #[serde(rename = "game")]
    pub resource_id: String,
    /// Party size.
    pub players: u32,
    /// Start time.
    pub time: TimeOfDay,
    /// Booked day.
    pub day: NaiveDate,
    /// Length the booking was admitted with. Absent on uncapped table bookings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Reservation {
    /// Build a new reservation with a fresh id.
    pub fn new(
        user_id: UserId,
        resource_id: impl Into<String>,
        players: u32,
        time: TimeOfDay,
        day: NaiveDate,
        duration_minutes: Option<u32>,
    ) -> Self {
        Self {
            id: ReservationId::new(),
            user_id,
            resource_id: resource_id.into(),
            players,
            time,
            day,
            duration_minutes,
        }
    }

    /// Occupied window, when the booking carries a duration.
    pub fn window(&self) -> Option<SlotWindow> {
        self.duration_minutes
            .and_then(|duration| SlotWindow::bounded(self.time, duration))
    }

    /// Convert to the document form written to the store.
    pub fn to_document(&self) -> ReservationDocument {
        ReservationDocument {
            id: Some(self.id.to_string()),
            user_id: Some(self.user_id.to_string()),
            game: Some(self.resource_id.clone()),
            players: Some(i64::from(self.players)),
            time: Some(self.time.to_string()),
            day: Some(self.day.format("%Y-%m-%d").to_string()),
            duration_minutes: self.duration_minutes.map(i64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let reservation = Reservation::new(
            UserId::new("u1"),
            "Catan",
            3,
            TimeOfDay::parse("14:30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            Some(60),
        );
        let value = serde_json::to_value(&reservation).expect("serialize");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["game"], "Catan");
        assert_eq!(value["time"], "14:30");
        assert_eq!(value["day"], "2025-06-01");
        assert_eq!(value["durationMinutes"], 60);
    }

    #[test]
    fn test_table_booking_omits_duration() {
        let reservation = Reservation::new(
            UserId::new("u1"),
            "table",
            4,
            TimeOfDay::parse("19:00").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            None,
        );
        let value = serde_json::to_value(&reservation).expect("serialize");
        assert!(value.get("durationMinutes").is_none());
        assert!(reservation.window().is_none());
    }
}
