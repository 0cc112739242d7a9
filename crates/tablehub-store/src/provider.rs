//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use tablehub_core::config::StoreConfig;
use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;

use crate::memory::{MemoryGameCatalog, MemoryReservationStore};
use crate::traits::{GameCatalog, ReservationStore};

/// Holds the reservation store and game catalog selected by configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    reservations: Arc<dyn ReservationStore>,
    catalog: Arc<dyn GameCatalog>,
}

impl StoreManager {
    /// Create the backends named by `config.provider`.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis reservation store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Ok(Self {
                    reservations: Arc::new(crate::redis::RedisReservationStore::new(client.clone())),
                    catalog: Arc::new(crate::redis::RedisGameCatalog::new(client)),
                })
            }
            "memory" => {
                info!("Initializing in-memory reservation store");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: memory, redis"
            ))),
        }
    }

    /// Empty in-memory backends.
    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(MemoryReservationStore::new()),
            Arc::new(MemoryGameCatalog::new()),
        )
    }

    /// Wrap existing backends (for seeding and tests).
    pub fn from_parts(
        reservations: Arc<dyn ReservationStore>,
        catalog: Arc<dyn GameCatalog>,
    ) -> Self {
        Self {
            reservations,
            catalog,
        }
    }

    /// Shared handle to the reservation store.
    pub fn reservations(&self) -> Arc<dyn ReservationStore> {
        Arc::clone(&self.reservations)
    }

    /// Shared handle to the game catalog.
    pub fn catalog(&self) -> Arc<dyn GameCatalog> {
        Arc::clone(&self.catalog)
    }
}
