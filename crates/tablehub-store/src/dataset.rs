//! JSON dataset files used to seed and persist the in-memory backends.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_entity::board_game::BoardGame;
use tablehub_entity::reservation::ReservationDocument;

use crate::memory::{MemoryGameCatalog, MemoryReservationStore};
use crate::provider::StoreManager;

/// Contents of a dataset file: `{"games": [...], "reservations": [...]}`.
///
/// Reservations are kept in document form so records with missing fields
/// survive a load and save unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Catalog entries.
    #[serde(default)]
    pub games: Vec<BoardGame>,
    /// Stored reservation documents.
    #[serde(default)]
    pub reservations: Vec<ReservationDocument>,
}

impl Dataset {
    /// Read a dataset from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to read dataset '{}'", path.display()),
                e,
            )
        })?;
        let dataset: Self = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            games = dataset.games.len(),
            reservations = dataset.reservations.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Write the dataset as pretty-printed JSON.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to write dataset '{}'", path.display()),
                e,
            )
        })?;
        info!(path = %path.display(), "Dataset saved");
        Ok(())
    }

    /// In-memory backends seeded with this dataset.
    pub fn into_stores(self) -> StoreManager {
        StoreManager::from_parts(
            Arc::new(MemoryReservationStore::with_documents(self.reservations)),
            Arc::new(MemoryGameCatalog::with_games(self.games)),
        )
    }

    /// Capture the current contents of `stores`.
    pub async fn capture(stores: &StoreManager) -> AppResult<Self> {
        Ok(Self {
            games: stores.catalog().list().await?,
            reservations: stores.reservations().list_all().await?,
        })
    }
}
