//! Objective save: flatten the selection and post it once for the lesson period.

use crate::domain::{DomainError, LessonSession, ObjectiveSelection};
use crate::ports::SchoolApi;
use crate::usecases::{BusyFlag, with_timeout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct ObjectiveService {
    api: Arc<dyn SchoolApi>,
    busy: BusyFlag,
    request_timeout: Option<Duration>,
}

impl ObjectiveService {
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

    /// Save the selection. Blocks with `Validation` when nothing would be sent.
    /// On success the selection (and its free text) is cleared; on failure it is
    /// left intact so the user can try again.
    pub async fn save(
        &self,
        session: &LessonSession,
        selection: &mut ObjectiveSelection,
    ) -> Result<String, DomainError> {
        let payload = selection.payload();
        if payload.is_empty() {
            return Err(DomainError::Validation(
                "select at least one objective or enter one".to_string(),
            ));
        }

        let _guard = self.busy.acquire()?;
        if let Err(e) = with_timeout(
            self.request_timeout,
            self.api.save_objectives(session, &payload),
        )
        .await
        {
            warn!(program_id = %session.program_id, error = %e, "objective save failed");
            return Err(e);
        }

        info!(
            program_id = %session.program_id,
            items = selection.keys().len(),
            "objectives saved"
        );
        selection.clear();
        Ok(payload)
    }
}
