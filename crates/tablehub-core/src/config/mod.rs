//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus a `TABLEHUB__` environment overlay. Each
//! sub-module represents a logical configuration section.

pub mod booking;
pub mod logging;
pub mod store;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::booking::{AdmissionConfig, AdmissionStrategy, BookingConfig, TableBookingConfig};
pub use self::logging::LoggingConfig;
pub use self::store::{RedisStoreConfig, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reservation store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Booking policy and admission settings.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration rooted at an explicit base file path (no extension).
    ///
    /// Merges the base file, an optional `{env}` overlay in the same
    /// directory, and environment variables prefixed with `TABLEHUB__`.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay_path(base, env)).required(false))
            .add_source(
                config::Environment::with_prefix("TABLEHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.booking.validate()?;

        if self.booking.last_slot < self.booking.opening {
            return Err(AppError::configuration(format!(
                "booking.last_slot ({}) is before booking.opening ({})",
                self.booking.last_slot, self.booking.opening
            )));
        }
        if self.booking.table.capacity.is_some() && self.booking.table.duration_minutes == 0 {
            return Err(AppError::configuration(
                "booking.table.duration_minutes must be positive when a table capacity is set",
            ));
        }
        if self.store.timeout_ms == 0 {
            return Err(AppError::configuration("store.timeout_ms must be positive"));
        }

        Ok(())
    }
}

/// Path of the environment overlay that sits next to `base`.
fn overlay_path(base: &str, env: &str) -> String {
    match Path::new(base).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(env).to_string_lossy().into_owned(),
        _ => env.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.booking.horizon_days, 14);
        assert_eq!(config.booking.opening.to_string(), "14:00");
        assert_eq!(config.booking.last_slot.to_string(), "21:30");
        assert_eq!(config.booking.admission.strategy, AdmissionStrategy::Conditional);
        assert!(config.booking.table.capacity.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_document() {
        let raw = serde_json::json!({
            "booking": {
                "opening": "10:00",
                "admission": { "strategy": "serialized" },
                "table": { "capacity": 6 }
            }
        });
        let config: AppConfig = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(config.booking.opening.to_string(), "10:00");
        assert_eq!(config.booking.last_slot.to_string(), "21:30");
        assert_eq!(config.booking.admission.strategy, AdmissionStrategy::Serialized);
        assert_eq!(config.booking.table.capacity, Some(6));
        assert_eq!(config.store.timeout_ms, 5000);
    }

    #[test]
    fn test_rejects_inverted_opening_hours() {
        let mut config = AppConfig::default();
        config.booking.opening = crate::types::TimeOfDay::parse("22:00").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_overlay_sits_next_to_base() {
        assert_eq!(overlay_path("config/default", "staging"), "config/staging");
        assert_eq!(overlay_path("/etc/tablehub/base", "prod"), "/etc/tablehub/prod");
        assert_eq!(overlay_path("default", "prod"), "prod");
    }

    #[test]
    fn test_load_from_reads_overlay_in_base_directory() {
        let dir = std::env::temp_dir().join(format!("tablehub-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("base.toml"), "[booking]\nhorizon_days = 7\n").unwrap();
        std::fs::write(dir.join("staging.toml"), "[booking]\nhorizon_days = 3\n").unwrap();

        let base = dir.join("base");
        let config = AppConfig::load_from(base.to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.booking.horizon_days, 3);
        let config = AppConfig::load_from(base.to_str().unwrap(), "missing").unwrap();
        assert_eq!(config.booking.horizon_days, 7);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_zero_slot_interval() {
        let mut config = AppConfig::default();
        config.booking.slot_interval_minutes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
