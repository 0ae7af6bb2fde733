//! Application use cases. Orchestrate domain logic via ports.

pub mod attendance_sync;
pub mod busy;
pub mod catalog_service;
pub mod objective_service;
pub mod roster_service;

pub use attendance_sync::AttendanceSyncEngine;
pub use busy::BusyFlag;
pub use catalog_service::{CatalogState, ObjectiveCatalog};
pub use objective_service::ObjectiveService;
pub use roster_service::RosterService;

use crate::domain::DomainError;
use std::future::Future;
use std::time::Duration;

/// Await `fut`, failing with `DomainError::Timeout` after `limit`. `None` waits forever.
pub(crate) async fn with_timeout<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = Result<T, DomainError>>,
) -> Result<T, DomainError> {
    match limit {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| DomainError::Timeout {
                millis: d.as_millis() as u64,
            })?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_keeps_sub_second_limit() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DomainError>(())
        };
        let err = with_timeout(Some(Duration::from_millis(20)), slow)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Timeout { millis: 20 });
        assert_eq!(err.to_string(), "Request timed out after 20 ms");
    }

    #[tokio::test]
    async fn test_no_limit_waits() {
        let fast = async { Ok::<_, DomainError>(7) };
        assert_eq!(with_timeout(None, fast).await, Ok(7));
    }
}
