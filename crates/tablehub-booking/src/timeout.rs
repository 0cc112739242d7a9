//! Store round-trip deadlines.

use std::future::Future;
use std::time::Duration;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;

/// Run a store operation under a deadline. Expiry is a query failure.
pub(crate) async fn within<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(elapsed) => Err(AppError::with_source(
            ErrorKind::Query,
            format!(
                "Store {operation} timed out after {}ms",
                limit.as_millis()
            ),
            elapsed,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expiry_is_query_failure() {
        let err = within(Duration::from_millis(50), "read", async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.is(ErrorKind::Query));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let err = within::<(), _>(Duration::from_secs(1), "write", async {
            Err(AppError::write("disk full"))
        })
        .await
        .unwrap_err();
        assert!(err.is(ErrorKind::Write));
    }
}
