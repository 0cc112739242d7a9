//! Booking policy and admission configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::time::TimeOfDay;

/// Booking rules applied before and during admission.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How many days ahead of today a reservation may be placed (inclusive).
    #[serde(default = "default_horizon_days")]
    #[validate(range(max = 365))]
    pub horizon_days: u32,
    /// First bookable start time of the day.
    #[serde(default = "default_opening")]
    pub opening: TimeOfDay,
    /// Last bookable start time of the day.
    #[serde(default = "default_last_slot")]
    pub last_slot: TimeOfDay,
    /// Spacing between bookable start times in minutes.
    #[serde(default = "default_slot_interval")]
    #[validate(range(min = 1, max = 720))]
    pub slot_interval_minutes: u32,
    /// Plain table booking settings.
    #[serde(default)]
    pub table: TableBookingConfig,
    /// Admission concurrency settings.
    #[serde(default)]
    pub admission: AdmissionConfig,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            opening: default_opening(),
            last_slot: default_last_slot(),
            slot_interval_minutes: default_slot_interval(),
            table: TableBookingConfig::default(),
            admission: AdmissionConfig::default(),
        }
    }
}

/// Settings for reservations of a table without a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBookingConfig {
    /// Resource id stored on table reservations in place of a game name.
    #[serde(default = "default_table_resource")]
    pub resource_id: String,
    /// Number of tables that may be booked concurrently.
    ///
    /// `None` admits every table booking without an overlap check.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Assumed length of a table booking when `capacity` is set.
    #[serde(default = "default_table_duration")]
    pub duration_minutes: u32,
}

impl Default for TableBookingConfig {
    fn default() -> Self {
        Self {
            resource_id: default_table_resource(),
            capacity: None,
            duration_minutes: default_table_duration(),
        }
    }
}

/// Admission configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// How concurrent admissions to the same game and day are kept from
    /// exceeding stock.
    #[serde(default)]
    pub strategy: AdmissionStrategy,
}

/// Strategy binding the availability check to the reservation write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStrategy {
    /// The store re-counts overlaps atomically with the insert.
    #[default]
    Conditional,
    /// A per game-and-day lock is held across check and write (single node).
    Serialized,
}

impl std::fmt::Display for AdmissionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdmissionStrategy::Conditional => write!(f, "conditional"),
            AdmissionStrategy::Serialized => write!(f, "serialized"),
        }
    }
}

fn default_horizon_days() -> u32 {
    14
}

fn default_opening() -> TimeOfDay {
    TimeOfDay::from_hm(14, 0).unwrap_or_default()
}

fn default_last_slot() -> TimeOfDay {
    TimeOfDay::from_hm(21, 30).unwrap_or_default()
}

fn default_slot_interval() -> u32 {
    30
}

fn default_table_resource() -> String {
    "table".to_string()
}

fn default_table_duration() -> u32 {
    120
}
