//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    AttendanceEntry, AttendanceStatus, DomainError, LessonSession, ObjectiveNode, Student,
};

/// One roster row as returned by the backend. `status` is `None` when the server
/// has no record for the student yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
    pub student: Student,
    pub status: Option<AttendanceStatus>,
}

/// School backend API. The adapter owns authentication; the core only sees
/// decoded domain values.
#[async_trait::async_trait]
pub trait SchoolApi: Send + Sync {
    /// Fetch the roster for the lesson period with any statuses already recorded.
    async fn fetch_roster(
        &self,
        session: &LessonSession,
    ) -> Result<Vec<RosterRecord>, DomainError>;

    /// Record one student's attendance for the lesson period.
    async fn submit_attendance(
        &self,
        session: &LessonSession,
        entry: &AttendanceEntry,
    ) -> Result<(), DomainError>;

    /// Fetch the two-level objective tree for a subject and class.
    async fn fetch_objectives(
        &self,
        subject: &str,
        class_id: &str,
    ) -> Result<Vec<ObjectiveNode>, DomainError>;

    /// Save the flattened objective string for the lesson period.
    async fn save_objectives(
        &self,
        session: &LessonSession,
        objectives: &str,
    ) -> Result<(), DomainError>;
}

/// Report sink. Persist an attendance report for the teacher's records.
pub trait ReportPort: Send + Sync {
    /// Write the report and return where it was written.
    fn write_attendance_report(
        &self,
        session: &LessonSession,
        store: &crate::domain::AttendanceStore,
    ) -> Result<std::path::PathBuf, DomainError>;
}
