//! Attendance sync: walk the store's entries and push them to the backend.
//!
//! - Present entries are not sent; only Absent and Late are submitted
//! - One request per entry, strictly sequential
//! - A failed entry is counted and skipped; the batch always runs to the end
//! - No automatic retry; the caller re-invokes `submit` after review
//! - A second `submit` while one is running is rejected with `DomainError::Busy`

use crate::domain::{AttendanceEntry, AttendanceStatus, DomainError, LessonSession, SubmitOutcome};
use crate::ports::SchoolApi;
use crate::usecases::{BusyFlag, with_timeout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Whether an entry is sent to the backend. Present is treated as the server's
/// default and never submitted.
pub fn is_submitted(entry: &AttendanceEntry) -> bool {
    entry.status != AttendanceStatus::Present
}

pub struct AttendanceSyncEngine {
    api: Arc<dyn SchoolApi>,
    busy: BusyFlag,
    /// Per-request limit. `None` lets a stalled request block the batch.
    request_timeout: Option<Duration>,
}

impl AttendanceSyncEngine {
    pub fn new(api: Arc<dyn SchoolApi>, request_timeout: Option<Duration>) -> Self {
        Self {
            api,
            busy: BusyFlag::new(),
            request_timeout,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Entries that `submit` would send, in order.
    pub fn pending<'a>(&self, entries: &'a [AttendanceEntry]) -> Vec<&'a AttendanceEntry> {
        entries.iter().filter(|e| is_submitted(e)).collect()
    }

    pub async fn submit(
        &self,
        entries: &[AttendanceEntry],
        session: &LessonSession,
    ) -> Result<SubmitOutcome, DomainError> {
        self.submit_with_progress(entries, session, |_, _| {}).await
    }

    /// Like `submit`, calling `on_entry` after each request with its result.
    /// The only error returned is `Busy`; per-entry failures land in the outcome.
    pub async fn submit_with_progress<F>(
        &self,
        entries: &[AttendanceEntry],
        session: &LessonSession,
        mut on_entry: F,
    ) -> Result<SubmitOutcome, DomainError>
    where
        F: FnMut(&AttendanceEntry, &Result<(), DomainError>) + Send,
    {
        let _guard = self.busy.acquire()?;
        let pending = self.pending(entries);
        info!(
            program_id = %session.program_id,
            total = entries.len(),
            to_submit = pending.len(),
            "submitting attendance"
        );

        let mut outcome = SubmitOutcome::default();
        for entry in pending {
            let result = with_timeout(
                self.request_timeout,
                self.api.submit_attendance(session, entry),
            )
            .await;

            match &result {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => {
                    warn!(
                        student_id = entry.student_id,
                        status = %entry.status,
                        error = %e,
                        "attendance entry failed"
                    );
                    outcome.failed += 1;
                    outcome.failed_students.push(entry.student_id);
                }
            }
            on_entry(entry, &result);
        }

        info!(
            program_id = %session.program_id,
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "attendance submit finished"
        );
        Ok(outcome)
    }
}
