//! Redis board game catalog.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::info;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::BoardGameId;
use tablehub_entity::board_game::BoardGame;

use super::client::RedisClient;
use crate::keys;
use crate::traits::GameCatalog;

/// Board game catalog stored as a Redis hash of JSON documents.
///
/// A second hash maps names to ids and guards name uniqueness.
#[derive(Debug, Clone)]
pub struct RedisGameCatalog {
    /// Redis client.
    client: RedisClient,
}

impl RedisGameCatalog {
    /// Create a new Redis game catalog.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn games_key(&self) -> String {
        self.client.prefixed_key(&keys::games())
    }

    fn names_key(&self) -> String {
        self.client.prefixed_key(&keys::game_names())
    }

    fn read_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Query, format!("Redis read failed: {e}"), e)
    }

    fn write_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Write, format!("Redis write failed: {e}"), e)
    }

    async fn get(&self, id: &BoardGameId) -> AppResult<Option<BoardGame>> {
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn
            .hget(self.games_key(), id.to_string())
            .await
            .map_err(Self::read_err)?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl GameCatalog for RedisGameCatalog {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<BoardGame>> {
        let mut conn = self.client.conn_mut();
        let id: Option<String> = conn
            .hget(self.names_key(), name)
            .await
            .map_err(Self::read_err)?;

        match id {
            Some(id) => {
                let id: BoardGameId = id.parse().map_err(|e| {
                    AppError::with_source(ErrorKind::Serialization, "Corrupt game name index", e)
                })?;
                self.get(&id).await
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> AppResult<Vec<BoardGame>> {
        let mut conn = self.client.conn_mut();
        let raw: Vec<String> = conn.hvals(self.games_key()).await.map_err(Self::read_err)?;

        let mut games = raw
            .iter()
            .map(|json| serde_json::from_str::<BoardGame>(json))
            .collect::<Result<Vec<_>, _>>()?;
        games.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(games)
    }

    async fn insert(&self, game: &BoardGame) -> AppResult<()> {
        let json = serde_json::to_string(game)?;
        let mut conn = self.client.conn_mut();

        let claimed: bool = conn
            .hset_nx(self.names_key(), &game.name, game.id.to_string())
            .await
            .map_err(Self::write_err)?;
        if !claimed {
            return Err(AppError::conflict(format!(
                "A game named '{}' already exists",
                game.name
            )));
        }

        let _: () = conn
            .hset(self.games_key(), game.id.to_string(), json)
            .await
            .map_err(Self::write_err)?;

        info!(id = %game.id, name = %game.name, stock = game.stock, "Board game added via Redis");
        Ok(())
    }

    async fn remove(&self, id: &BoardGameId) -> AppResult<bool> {
        let Some(game) = self.get(id).await? else {
            return Ok(false);
        };

        let mut conn = self.client.conn_mut();
        let _: () = redis::pipe()
            .atomic()
            .hdel(self.games_key(), id.to_string())
            .ignore()
            .hdel(self.names_key(), &game.name)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(Self::write_err)?;
        Ok(true)
    }

    async fn update_stock(&self, id: &BoardGameId, stock: u32) -> AppResult<Option<BoardGame>> {
        let Some(mut game) = self.get(id).await? else {
            return Ok(None);
        };
        game.stock = stock;

        let json = serde_json::to_string(&game)?;
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .hset(self.games_key(), id.to_string(), json)
            .await
            .map_err(Self::write_err)?;

        info!(id = %id, stock = stock, "Board game stock updated via Redis");
        Ok(Some(game))
    }
}
