//! Redis reservation store implementation.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info, warn};

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::{ReservationId, SlotWindow};
use tablehub_entity::reservation::{Reservation, ReservationDocument};

use super::client::RedisClient;
use super::scripts;
use crate::keys;
use crate::traits::{CapacityOutcome, ReservationStore};

/// Redis-backed reservation store for multi-node deployments.
///
/// Each `(resource, day)` pair is one Redis list of JSON documents.
#[derive(Debug, Clone)]
pub struct RedisReservationStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisReservationStore {
    /// Create a new Redis reservation store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn read_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Query, format!("Redis read failed: {e}"), e)
    }

    fn write_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Write, format!("Redis write failed: {e}"), e)
    }

    fn list_key(&self, resource_id: &str, day: &str) -> String {
        self.client.prefixed_key(&keys::reservations(resource_id, day))
    }

    async fn read_list(&self, list_key: &str) -> AppResult<Vec<ReservationDocument>> {
        let mut conn = self.client.conn_mut();
        let raw: Vec<String> = conn.lrange(list_key, 0, -1).await.map_err(Self::read_err)?;
        Ok(decode_documents(&raw))
    }
}

/// Decode stored JSON documents, dropping any that do not decode.
fn decode_documents(raw: &[String]) -> Vec<ReservationDocument> {
    raw.iter()
        .filter_map(|json| match serde_json::from_str(json) {
            Ok(doc) => Some(doc),
            Err(e) => {
                debug!(error = %e, "Skipping undecodable reservation document");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ReservationStore for RedisReservationStore {
    async fn find_by_resource_day(
        &self,
        resource_id: &str,
        day: &str,
    ) -> AppResult<Vec<ReservationDocument>> {
        let list_key = self.list_key(resource_id, day);
        self.read_list(&list_key).await
    }

    async fn append(&self, reservation: &Reservation) -> AppResult<()> {
        let day = reservation.day.format("%Y-%m-%d").to_string();
        let list_key = self.list_key(&reservation.resource_id, &day);
        let json = serde_json::to_string(&reservation.to_document())?;

        let mut conn = self.client.conn_mut();
        let _: () = redis::pipe()
            .atomic()
            .rpush(&list_key, json)
            .ignore()
            .hset(
                self.client.prefixed_key(&keys::reservation_index()),
                reservation.id.to_string(),
                &list_key,
            )
            .ignore()
            .sadd(self.client.prefixed_key(&keys::reservation_lists()), &list_key)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(Self::write_err)?;

        debug!(id = %reservation.id, list = %list_key, "Reservation appended via Redis");
        Ok(())
    }

    async fn append_within_capacity(
        &self,
        reservation: &Reservation,
        window: SlotWindow,
        stock: u32,
    ) -> AppResult<CapacityOutcome> {
        let day = reservation.day.format("%Y-%m-%d").to_string();
        let list_key = self.list_key(&reservation.resource_id, &day);
        let json = serde_json::to_string(&reservation.to_document())?;

        let mut conn = self.client.conn_mut();
        let (appended, overlapping): (i64, i64) =
            redis::Script::new(scripts::APPEND_WITHIN_CAPACITY)
                .key(&list_key)
                .key(self.client.prefixed_key(&keys::reservation_index()))
                .key(self.client.prefixed_key(&keys::reservation_lists()))
                .arg(window.start)
                .arg(window.end)
                .arg(stock)
                .arg(json)
                .arg(reservation.id.to_string())
                .arg(SlotWindow::MAX_DURATION_MINUTES)
                .invoke_async(&mut conn)
                .await
                .map_err(Self::write_err)?;

        let overlapping = u32::try_from(overlapping).unwrap_or(u32::MAX);
        if appended == 1 {
            info!(
                id = %reservation.id,
                resource_id = %reservation.resource_id,
                overlapping = overlapping,
                stock = stock,
                "Reservation appended via Redis script"
            );
            Ok(CapacityOutcome::Appended)
        } else {
            warn!(
                resource_id = %reservation.resource_id,
                day = %day,
                overlapping = overlapping,
                stock = stock,
                "Redis script refused append: slot full"
            );
            Ok(CapacityOutcome::Full { overlapping })
        }
    }

    async fn list_all(&self) -> AppResult<Vec<ReservationDocument>> {
        let mut conn = self.client.conn_mut();
        let mut list_keys: Vec<String> = conn
            .smembers(self.client.prefixed_key(&keys::reservation_lists()))
            .await
            .map_err(Self::read_err)?;
        list_keys.sort();

        let mut documents = Vec::new();
        for list_key in list_keys {
            documents.extend(self.read_list(&list_key).await?);
        }
        Ok(documents)
    }

    async fn delete(&self, id: &ReservationId) -> AppResult<bool> {
        let index_key = self.client.prefixed_key(&keys::reservation_index());
        let id = id.to_string();

        let mut conn = self.client.conn_mut();
        let list_key: Option<String> = conn.hget(&index_key, &id).await.map_err(Self::read_err)?;
        let Some(list_key) = list_key else {
            return Ok(false);
        };

        let removed: i64 = redis::Script::new(scripts::DELETE_BY_ID)
            .key(&index_key)
            .key(&list_key)
            .arg(&id)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::write_err)?;

        if removed == 1 {
            info!(id = %id, "Reservation deleted via Redis");
        }
        Ok(removed == 1)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await.map_err(|e| {
            AppError::with_source(ErrorKind::ServiceUnavailable, "Redis PING failed", e)
        })?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_skips_garbage() {
        let raw = vec![
            r#"{"game":"Catan","day":"2025-06-01","time":"14:00","durationMinutes":60}"#.to_string(),
            "not json".to_string(),
            r#"{"game":"Catan","time":14}"#.to_string(),
        ];
        let docs = decode_documents(&raw);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].duration_minutes, Some(60));
    }
}
