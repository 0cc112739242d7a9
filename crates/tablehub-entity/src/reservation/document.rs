//! Raw reservation documents as returned by a store.
//!
//! Stores hold loosely-typed documents. Any field may be missing or carry
//! the wrong shape, so every field is optional and conversion into typed
//! values is fallible per field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tablehub_core::types::{SlotWindow, TimeOfDay, UserId, parse_day};

use super::model::Reservation;

/// A stored reservation record in its document form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDocument {
    /// Store record id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User who placed the reservation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Game name or table resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    /// Party size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<i64>,
    /// Start time, `"HH:MM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Booked day, `"YYYY-MM-DD"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    /// Booking length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

impl ReservationDocument {
    /// Whether this document belongs to the given resource and day.
    ///
    /// Both fields are compared by exact string equality.
    pub fn matches(&self, resource_id: &str, day: &str) -> bool {
        self.game.as_deref() == Some(resource_id) && self.day.as_deref() == Some(day)
    }

    /// Occupied window of this record.
    ///
    /// `None` when the time or duration is missing or malformed, or the
    /// duration exceeds one day; such a record never conflicts with anything.
    pub fn window(&self) -> Option<SlotWindow> {
        let time = self.time.as_deref()?;
        let duration = self.duration_minutes?;

        let start = TimeOfDay::parse(time).ok()?;
        let duration = u32::try_from(duration).ok()?;
        SlotWindow::bounded(start, duration)
    }

    /// Convert to a typed reservation, dropping documents with missing or
    /// malformed required fields.
    pub fn to_reservation(&self) -> Option<Reservation> {
        let converted = (|| {
            Some(Reservation {
                id: self.id.as_deref()?.parse().ok()?,
                user_id: UserId::new(self.user_id.clone()?),
                resource_id: self.game.clone()?,
                players: u32::try_from(self.players?).ok()?,
                time: TimeOfDay::parse(self.time.as_deref()?).ok()?,
                day: parse_day(self.day.as_deref()?).ok()?,
                duration_minutes: self.duration_minutes.and_then(|d| u32::try_from(d).ok()),
            })
        })();

        if converted.is_none() {
            debug!(id = ?self.id, "Dropping malformed reservation document");
        }
        converted
    }
}
