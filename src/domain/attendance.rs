//! Attendance store. Local view of per-student status for one lesson session.
//!
//! Every roster student has an entry from `init` onwards; mutation happens only
//! through explicit status changes.

use crate::domain::{AttendanceEntry, AttendanceStatus, AttendanceSummary, DomainError, Student};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceStore {
    roster: Vec<Student>,
    statuses: HashMap<i64, AttendanceStatus>,
}

impl AttendanceStore {
    /// Seed the store. A missing or null server value defaults to Present;
    /// any decoded value is kept as is.
    pub fn init(
        roster: Vec<Student>,
        server_statuses: &HashMap<i64, Option<AttendanceStatus>>,
    ) -> Self {
        let statuses = roster
            .iter()
            .map(|s| {
                let status = server_statuses
                    .get(&s.id)
                    .copied()
                    .flatten()
                    .unwrap_or(AttendanceStatus::Present);
                (s.id, status)
            })
            .collect();
        Self { roster, statuses }
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn student(&self, student_id: i64) -> Option<&Student> {
        self.roster.iter().find(|s| s.id == student_id)
    }

    pub fn status(&self, student_id: i64) -> Option<AttendanceStatus> {
        self.statuses.get(&student_id).copied()
    }

    /// Overwrite one student's status. Idempotent.
    pub fn set_status(
        &mut self,
        student_id: i64,
        status: AttendanceStatus,
    ) -> Result<(), DomainError> {
        match self.statuses.get_mut(&student_id) {
            Some(slot) => {
                *slot = status;
                Ok(())
            }
            None => Err(DomainError::Validation(format!(
                "student {} is not on the roster",
                student_id
            ))),
        }
    }

    /// Advance one student to the next status in the tap cycle and return it.
    pub fn toggle(&mut self, student_id: i64) -> Result<AttendanceStatus, DomainError> {
        let next = self
            .status(student_id)
            .map(AttendanceStatus::next)
            .ok_or_else(|| {
                DomainError::Validation(format!("student {} is not on the roster", student_id))
            })?;
        self.set_status(student_id, next)?;
        Ok(next)
    }

    pub fn mark_all(&mut self, status: AttendanceStatus) {
        for slot in self.statuses.values_mut() {
            *slot = status;
        }
    }

    /// Entries in roster order.
    pub fn entries(&self) -> Vec<AttendanceEntry> {
        self.roster
            .iter()
            .filter_map(|s| {
                self.statuses.get(&s.id).map(|&status| AttendanceEntry {
                    student_id: s.id,
                    status,
                })
            })
            .collect()
    }

    pub fn summary(&self) -> AttendanceSummary {
        let mut summary = AttendanceSummary {
            total: self.roster.len(),
            ..Default::default()
        };
        for student in &self.roster {
            let Some(status) = self.statuses.get(&student.id) else {
                continue;
            };
            summary.recorded += 1;
            match status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
            }
        }
        summary
    }

    /// Pre-submit sanity check: every roster student has a status.
    pub fn is_complete(&self) -> bool {
        let s = self.summary();
        s.recorded == s.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str) -> Student {
        Student {
            id,
            number: format!("{}", 100 + id),
            full_name: name.to_string(),
        }
    }

    fn store() -> AttendanceStore {
        let roster = vec![
            student(1, "Ayşe Yılmaz"),
            student(2, "Mehmet Demir"),
            student(3, "Zeynep Kaya"),
        ];
        let mut server = HashMap::new();
        server.insert(1, None);
        server.insert(2, Some(AttendanceStatus::Absent));
        server.insert(3, Some(AttendanceStatus::Late));
        AttendanceStore::init(roster, &server)
    }

    #[test]
    fn test_init_defaults_null_to_present_and_preserves_codes() {
        let s = store();
        assert_eq!(s.status(1), Some(AttendanceStatus::Present));
        assert_eq!(s.status(2), Some(AttendanceStatus::Absent));
        assert_eq!(s.status(3), Some(AttendanceStatus::Late));
    }

    #[test]
    fn test_init_covers_students_missing_from_server() {
        let roster = vec![student(1, "A"), student(9, "B")];
        let s = AttendanceStore::init(roster, &HashMap::new());
        assert!(s.is_complete());
        assert_eq!(s.summary().present, 2);
        assert_eq!(s.status(9), Some(AttendanceStatus::Present));
    }

    #[test]
    fn test_set_status_is_idempotent() {
        let mut once = store();
        once.set_status(1, AttendanceStatus::Absent).unwrap();
        let mut twice = store();
        twice.set_status(1, AttendanceStatus::Absent).unwrap();
        twice.set_status(1, AttendanceStatus::Absent).unwrap();
        assert_eq!(once.summary(), twice.summary());
        assert_eq!(twice.summary().absent, 2);
    }

    #[test]
    fn test_set_status_unknown_student() {
        let mut s = store();
        let err = s.set_status(42, AttendanceStatus::Late).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(s.summary().total, 3);
    }

    #[test]
    fn test_summary_counts() {
        let s = store();
        assert_eq!(
            s.summary(),
            AttendanceSummary {
                total: 3,
                recorded: 3,
                present: 1,
                absent: 1,
                late: 1,
            }
        );
        assert!(s.is_complete());
    }

    #[test]
    fn test_toggle_and_mark_all() {
        let mut s = store();
        assert_eq!(s.toggle(1).unwrap(), AttendanceStatus::Absent);
        assert_eq!(s.toggle(1).unwrap(), AttendanceStatus::Late);
        s.mark_all(AttendanceStatus::Present);
        assert_eq!(s.summary().present, 3);
    }

    #[test]
    fn test_entries_follow_roster_order() {
        let ids: Vec<i64> = store().entries().iter().map(|e| e.student_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
