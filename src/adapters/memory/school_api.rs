//! In-memory SchoolApi with seeded data, call recording and injectable failures.

use crate::domain::{
    AttendanceEntry, AttendanceStatus, DomainError, LessonSession, ObjectiveNode, Student,
};
use crate::ports::{RosterRecord, SchoolApi};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

/// A request observed by the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchRoster { program_id: String },
    SubmitAttendance { student_id: i64, status: AttendanceStatus },
    FetchObjectives { subject: String, class_id: String },
    SaveObjectives { program_id: String, objectives: String },
}

pub struct InMemorySchoolApi {
    roster: Mutex<Vec<RosterRecord>>,
    catalog: Vec<ObjectiveNode>,
    failing_students: HashSet<i64>,
    fail_roster: AtomicBool,
    fail_catalog: AtomicBool,
    fail_save: AtomicBool,
    /// Simulated network delay applied to every call.
    delay: Duration,
    calls: Mutex<Vec<ApiCall>>,
}

impl InMemorySchoolApi {
    pub fn new(roster: Vec<RosterRecord>, catalog: Vec<ObjectiveNode>) -> Self {
        Self {
            roster: Mutex::new(roster),
            catalog,
            failing_students: HashSet::new(),
            fail_roster: AtomicBool::new(false),
            fail_catalog: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Seeded class for trying the front end without a backend.
    pub fn demo() -> Self {
        let names = [
            (1, "101", "Ayşe Yılmaz", None),
            (2, "102", "Mehmet Demir", Some(AttendanceStatus::Absent)),
            (3, "103", "Zeynep Kaya", None),
            (4, "104", "Emre Çelik", Some(AttendanceStatus::Late)),
            (5, "105", "Elif Şahin", None),
        ];
        let roster = names
            .into_iter()
            .map(|(id, number, name, status)| RosterRecord {
                student: Student {
                    id,
                    number: number.to_string(),
                    full_name: name.to_string(),
                },
                status,
            })
            .collect();
        let catalog = vec![
            ObjectiveNode {
                id: 5,
                title: "Sayılar".to_string(),
                subtopics: vec!["Toplama".to_string(), "Çıkarma".to_string()],
            },
            ObjectiveNode {
                id: 6,
                title: "Ölçme".to_string(),
                subtopics: vec!["Uzunluk".to_string(), "Zaman".to_string()],
            },
            ObjectiveNode {
                id: 7,
                title: "Geometrik Cisimler".to_string(),
                subtopics: vec![],
            },
        ];
        Self::new(roster, catalog).with_delay(Duration::from_millis(150))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every submit for `student_id` fails with a server error.
    pub fn with_failing_student(mut self, student_id: i64) -> Self {
        self.failing_students.insert(student_id);
        self
    }

    pub fn set_roster_failing(&self, failing: bool) {
        self.fail_roster.store(failing, Ordering::SeqCst);
    }

    pub fn set_catalog_failing(&self, failing: bool) {
        self.fail_catalog.store(failing, Ordering::SeqCst);
    }

    pub fn set_save_failing(&self, failing: bool) {
        self.fail_save.store(failing, Ordering::SeqCst);
    }

    /// Calls seen so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn unavailable() -> DomainError {
    DomainError::Server {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

#[async_trait::async_trait]
impl SchoolApi for InMemorySchoolApi {
    async fn fetch_roster(
        &self,
        session: &LessonSession,
    ) -> Result<Vec<RosterRecord>, DomainError> {
        self.record(ApiCall::FetchRoster {
            program_id: session.program_id.clone(),
        });
        self.simulate_latency().await;
        if self.fail_roster.load(Ordering::SeqCst) {
            return Err(DomainError::Network("connection refused".to_string()));
        }
        let roster = self
            .roster
            .lock()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        Ok(roster.clone())
    }

    async fn submit_attendance(
        &self,
        session: &LessonSession,
        entry: &AttendanceEntry,
    ) -> Result<(), DomainError> {
        self.record(ApiCall::SubmitAttendance {
            student_id: entry.student_id,
            status: entry.status,
        });
        self.simulate_latency().await;
        if self.failing_students.contains(&entry.student_id) {
            return Err(unavailable());
        }
        let mut roster = self
            .roster
            .lock()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        if let Some(rec) = roster.iter_mut().find(|r| r.student.id == entry.student_id) {
            rec.status = Some(entry.status);
        }
        info!(
            student_id = entry.student_id,
            program_id = %session.program_id,
            "[MEMORY] attendance recorded"
        );
        Ok(())
    }

    async fn fetch_objectives(
        &self,
        subject: &str,
        class_id: &str,
    ) -> Result<Vec<ObjectiveNode>, DomainError> {
        self.record(ApiCall::FetchObjectives {
            subject: subject.to_string(),
            class_id: class_id.to_string(),
        });
        self.simulate_latency().await;
        if self.fail_catalog.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.catalog.clone())
    }

    async fn save_objectives(
        &self,
        session: &LessonSession,
        objectives: &str,
    ) -> Result<(), DomainError> {
        self.record(ApiCall::SaveObjectives {
            program_id: session.program_id.clone(),
            objectives: objectives.to_string(),
        });
        self.simulate_latency().await;
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}
