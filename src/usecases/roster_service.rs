//! Roster load: fetch roster + prior statuses -> seed the attendance store.

use crate::domain::{AttendanceStore, DomainError, LessonSession};
use crate::ports::SchoolApi;
use crate::usecases::with_timeout;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct RosterService {
    api: Arc<dyn SchoolApi>,
    request_timeout: Option<Duration>,
}

impl RosterService {
    pub fn new(api: Arc<dyn SchoolApi>, request_timeout: Option<Duration>) -> Self {
        Self {
            api,
            request_timeout,
        }
    }

    /// Load the roster and build a complete store. A failure halts the flow;
    /// the caller retries explicitly.
    pub async fn load(&self, session: &LessonSession) -> Result<AttendanceStore, DomainError> {
        let records = with_timeout(self.request_timeout, self.api.fetch_roster(session)).await?;

        let statuses: HashMap<_, _> = records.iter().map(|r| (r.student.id, r.status)).collect();
        let roster = records.into_iter().map(|r| r.student).collect();
        let store = AttendanceStore::init(roster, &statuses);

        let summary = store.summary();
        info!(
            class_id = %session.class_id,
            program_id = %session.program_id,
            students = summary.total,
            absent = summary.absent,
            late = summary.late,
            "roster loaded"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySchoolApi;
    use crate::domain::AttendanceStatus;
    use crate::test_support::helpers::{record, session};

    #[tokio::test]
    async fn test_load_seeds_store() {
        let api = Arc::new(InMemorySchoolApi::new(
            vec![record(1, None), record(2, Some(AttendanceStatus::Absent))],
            vec![],
        ));
        let service = RosterService::new(api, None);
        let store = service.load(&session()).await.unwrap();
        assert_eq!(store.status(1), Some(AttendanceStatus::Present));
        assert_eq!(store.status(2), Some(AttendanceStatus::Absent));
        assert!(store.is_complete());
    }

    #[tokio::test]
    async fn test_load_failure_surfaces_error() {
        let api = Arc::new(InMemorySchoolApi::new(vec![record(1, None)], vec![]));
        api.set_roster_failing(true);
        let service = RosterService::new(api.clone(), None);
        let err = service.load(&session()).await.unwrap_err();
        assert!(matches!(err, DomainError::Network(_)));

        api.set_roster_failing(false);
        assert!(service.load(&session()).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_times_out() {
        let api = Arc::new(
            InMemorySchoolApi::new(vec![record(1, None)], vec![])
                .with_delay(Duration::from_millis(200)),
        );
        let service = RosterService::new(api, Some(Duration::from_millis(20)));
        let err = service.load(&session()).await.unwrap_err();
        assert!(matches!(err, DomainError::Timeout { .. }));
    }
}
