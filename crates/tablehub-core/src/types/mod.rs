//! Core type definitions used across the TableHub workspace.

pub mod id;
pub mod time;

pub use id::{BoardGameId, ReservationId, UserId};
pub use time::{SlotWindow, TimeOfDay, parse_day};
