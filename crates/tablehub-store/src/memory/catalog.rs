//! In-memory board game catalog.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::BoardGameId;
use tablehub_entity::board_game::BoardGame;

use crate::traits::GameCatalog;

/// In-memory game catalog keyed by catalog id.
#[derive(Debug, Clone, Default)]
pub struct MemoryGameCatalog {
    games: Arc<RwLock<HashMap<BoardGameId, BoardGame>>>,
}

impl MemoryGameCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with games. Later duplicates of a name are
    /// ignored.
    pub fn with_games(games: Vec<BoardGame>) -> Self {
        let mut by_id = HashMap::new();
        for game in games {
            if by_id.values().any(|g: &BoardGame| g.name == game.name) {
                continue;
            }
            by_id.insert(game.id, game);
        }
        Self {
            games: Arc::new(RwLock::new(by_id)),
        }
    }
}

#[async_trait]
impl GameCatalog for MemoryGameCatalog {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<BoardGame>> {
        let games = self.games.read().await;
        Ok(games.values().find(|g| g.name == name).cloned())
    }

    async fn list(&self) -> AppResult<Vec<BoardGame>> {
        let games = self.games.read().await;
        let mut listed: Vec<BoardGame> = games.values().cloned().collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }

    async fn insert(&self, game: &BoardGame) -> AppResult<()> {
        let mut games = self.games.write().await;
        if games.values().any(|g| g.name == game.name) {
            return Err(AppError::conflict(format!(
                "A game named '{}' already exists",
                game.name
            )));
        }
        games.insert(game.id, game.clone());
        info!(id = %game.id, name = %game.name, stock = game.stock, "Board game added");
        Ok(())
    }

    async fn remove(&self, id: &BoardGameId) -> AppResult<bool> {
        let mut games = self.games.write().await;
        Ok(games.remove(id).is_some())
    }

    async fn update_stock(&self, id: &BoardGameId, stock: u32) -> AppResult<Option<BoardGame>> {
        let mut games = self.games.write().await;
        Ok(games.get_mut(id).map(|game| {
            game.stock = stock;
            info!(id = %id, stock = stock, "Board game stock updated");
            game.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablehub_core::error::ErrorKind;

    fn game(name: &str) -> BoardGame {
        BoardGame {
            id: BoardGameId::new(),
            name: name.to_string(),
            min_players: 2,
            max_players: 4,
            duration_minutes: 45,
            stock: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let catalog = MemoryGameCatalog::new();
        catalog.insert(&game("Azul")).await.unwrap();
        assert!(catalog.find_by_name("Azul").await.unwrap().is_some());
        assert!(catalog.find_by_name("azul").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let catalog = MemoryGameCatalog::new();
        catalog.insert(&game("Azul")).await.unwrap();
        let err = catalog.insert(&game("Azul")).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let catalog = MemoryGameCatalog::with_games(vec![game("Catan"), game("Azul"), game("Catan")]);
        let names: Vec<String> = catalog.list().await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Azul", "Catan"]);
    }

    #[tokio::test]
    async fn test_update_stock_and_remove() {
        let catalog = MemoryGameCatalog::new();
        let azul = game("Azul");
        catalog.insert(&azul).await.unwrap();

        let updated = catalog.update_stock(&azul.id, 5).await.unwrap().unwrap();
        assert_eq!(updated.stock, 5);
        assert!(catalog.update_stock(&BoardGameId::new(), 5).await.unwrap().is_none());

        assert!(catalog.remove(&azul.id).await.unwrap());
        assert!(catalog.list().await.unwrap().is_empty());
    }
}
