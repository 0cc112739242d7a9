//! Capacity-aware availability check.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use tablehub_core::result::AppResult;
use tablehub_entity::reservation::{AvailabilityQuery, count_overlaps};
use tablehub_store::traits::ReservationStore;

use crate::timeout::within;

/// Decides whether a resource has a free copy for a requested window.
///
/// Stateless between calls; every check reads the store afresh.
#[derive(Debug, Clone)]
pub struct AvailabilityChecker {
    /// Reservation store.
    store: Arc<dyn ReservationStore>,
    /// Deadline for one store read.
    timeout: Duration,
}

impl AvailabilityChecker {
    /// Creates a new availability checker.
    pub fn new(store: Arc<dyn ReservationStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Whether `resource_id` can take another booking on `day` (`YYYY-MM-DD`)
    /// starting at `start` (`HH:MM`) for `duration_minutes`, given `stock`
    /// copies.
    ///
    /// A malformed `start` or `day` fails with a parse error before the store
    /// is read. Stored records with a missing or malformed time or duration
    /// never conflict.
    pub async fn check_availability(
        &self,
        resource_id: &str,
        day: &str,
        start: &str,
        duration_minutes: u32,
        stock: u32,
    ) -> AppResult<bool> {
        let query = AvailabilityQuery::parse(resource_id, day, start, duration_minutes, stock)?;
        self.check(&query).await
    }

    /// Typed form of [`check_availability`](Self::check_availability).
    pub async fn check(&self, query: &AvailabilityQuery) -> AppResult<bool> {
        let overlapping = self.overlapping(query).await?;
        Ok(overlapping < query.stock)
    }

    /// Number of stored reservations overlapping the requested window.
    pub async fn overlapping(&self, query: &AvailabilityQuery) -> AppResult<u32> {
        let day = query.day_key();
        let documents = within(
            self.timeout,
            "read",
            self.store.find_by_resource_day(&query.resource_id, &day),
        )
        .await?;

        let overlapping = count_overlaps(&query.window(), &documents);
        debug!(
            resource_id = %query.resource_id,
            day = %day,
            start = %query.start,
            candidates = documents.len(),
            overlapping = overlapping,
            stock = query.stock,
            "Availability computed"
        );
        Ok(overlapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablehub_core::error::ErrorKind;
    use tablehub_entity::reservation::ReservationDocument;

    use crate::test_support::{Fault, ScriptedStore, doc};

    const DAY: &str = "2025-06-01";

    fn checker(documents: Vec<ReservationDocument>) -> AvailabilityChecker {
        let store = ScriptedStore::new(documents, Fault::None);
        AvailabilityChecker::new(Arc::new(store), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_empty_day_is_available() {
        let checker = checker(vec![]);
        assert!(checker.check_availability("Catan", DAY, "10:00", 30, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_touching_windows_do_not_overlap() {
        let checker = checker(vec![doc("Catan", DAY, "10:00", 30)]);
        assert!(checker.check_availability("Catan", DAY, "10:30", 30, 1).await.unwrap());
        assert!(checker.check_availability("Catan", DAY, "09:30", 30, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_strict_overlap_consumes_a_copy() {
        let checker = checker(vec![doc("Catan", DAY, "10:00", 30)]);
        assert!(!checker.check_availability("Catan", DAY, "10:15", 30, 1).await.unwrap());
        assert!(checker.check_availability("Catan", DAY, "10:15", 30, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_stock_threshold() {
        let starts = ["14:00", "14:10", "14:20", "14:30", "14:40"];
        for n in 0..=starts.len() {
            let documents = starts[..n]
                .iter()
                .map(|start| doc("Catan", DAY, start, 60))
                .collect();
            let checker = checker(documents);
            let n = n as u32;

            let full = checker.check_availability("Catan", DAY, "14:30", 30, n).await.unwrap();
            assert!(!full, "{n} overlapping with stock {n}");
            let free = checker
                .check_availability("Catan", DAY, "14:30", 30, n + 1)
                .await
                .unwrap();
            assert!(free, "{n} overlapping with stock {}", n + 1);
        }
    }

    #[tokio::test]
    async fn test_oversized_request_duration_is_rejected() {
        let store = ScriptedStore::new(vec![], Fault::None);
        let checker = AvailabilityChecker::new(Arc::new(store.clone()), Duration::from_secs(1));
        let err = checker
            .check_availability("Catan", DAY, "14:00", u32::MAX, 1)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_stored_duration_never_conflicts() {
        let checker = checker(vec![
            doc("Catan", DAY, "14:00", i64::from(u32::MAX)),
            doc("Catan", DAY, "14:00", 1441),
        ]);
        assert!(checker.check_availability("Catan", DAY, "14:30", 60, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_days_and_resources_are_ignored() {
        let checker = checker(vec![
            doc("Catan", "2025-06-02", "10:00", 60),
            doc("Azul", DAY, "10:00", 60),
        ]);
        assert!(checker.check_availability("Catan", DAY, "10:00", 60, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_candidates_never_conflict() {
        let checker = checker(vec![
            ReservationDocument {
                game: Some("Catan".into()),
                day: Some(DAY.into()),
                time: Some("10:00".into()),
                ..ReservationDocument::default()
            },
            doc("Catan", DAY, "ten o'clock", 60),
            doc("Catan", DAY, "10:00", 0),
            doc("Catan", DAY, "10:00", -30),
        ]);
        assert!(checker.check_availability("Catan", DAY, "10:00", 60, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_request_fails_before_store_access() {
        let store = ScriptedStore::new(vec![], Fault::None);
        let checker = AvailabilityChecker::new(Arc::new(store.clone()), Duration::from_secs(1));

        let err = checker
            .check_availability("Catan", DAY, "25:00", 30, 1)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Parse));

        let err = checker
            .check_availability("Catan", "01/06/2025", "10:00", 30, 1)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Parse));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_query_failure() {
        let store = ScriptedStore::new(vec![], Fault::Fail);
        let checker = AvailabilityChecker::new(Arc::new(store), Duration::from_secs(1));
        let err = checker
            .check_availability("Catan", DAY, "10:00", 30, 1)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Query));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_times_out_as_query_failure() {
        let store = ScriptedStore::new(vec![], Fault::Slow(Duration::from_secs(10)));
        let checker = AvailabilityChecker::new(Arc::new(store), Duration::from_millis(200));
        let err = checker
            .check_availability("Catan", DAY, "10:00", 30, 1)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Query));
    }
}
