//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/wire types here — these are mapped from adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A student on the lesson roster. Supplied by the backend, immutable within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    /// School number as printed on the roster (may contain leading zeros).
    pub number: String,
    pub full_name: String,
}

/// Attendance status. Closed set; wire codes are 0 = Absent, 1 = Present, 2 = Late.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Absent,
    #[default]
    Present,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    /// Wire code (`durum`).
    pub fn code(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Late => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Absent),
            1 => Some(Self::Present),
            2 => Some(Self::Late),
            _ => None,
        }
    }

    /// Single-tap cycle: Present -> Absent -> Late -> Present.
    pub fn next(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent => Self::Late,
            Self::Late => Self::Present,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Present => "Present",
            Self::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

/// Identifies one scheduled lesson period. Immutable for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSession {
    pub class_id: String,
    pub date: NaiveDate,
    pub period_id: String,
    pub program_id: String,
    pub subject: String,
}

impl fmt::Display for LessonSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} (period {}, program {})",
            self.class_id, self.subject, self.date, self.period_id, self.program_id
        )
    }
}

/// Curriculum topic (baslik) with its leaf subtopics (altbaslik). Two levels only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveNode {
    pub id: i64,
    pub title: String,
    pub subtopics: Vec<String>,
}

impl ObjectiveNode {
    pub fn is_leaf(&self) -> bool {
        self.subtopics.is_empty()
    }

    pub fn has_subtopic(&self, value: &str) -> bool {
        self.subtopics.iter().any(|s| s == value)
    }
}

/// Counts over the attendance store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub recorded: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

/// Result of one batch submit. Successes are never rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub succeeded: usize,
    pub failed: usize,
    /// Students whose request failed, in submission order.
    pub failed_students: Vec<i64>,
}

impl SubmitOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        for status in AttendanceStatus::ALL {
            assert_eq!(AttendanceStatus::from_code(status.code() as i64), Some(status));
        }
        assert_eq!(AttendanceStatus::from_code(3), None);
        assert_eq!(AttendanceStatus::from_code(-1), None);
    }

    #[test]
    fn test_status_cycle_returns_to_start() {
        let s = AttendanceStatus::Present;
        assert_eq!(s.next(), AttendanceStatus::Absent);
        assert_eq!(s.next().next(), AttendanceStatus::Late);
        assert_eq!(s.next().next().next(), s);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = SubmitOutcome {
            succeeded: 3,
            failed: 1,
            failed_students: vec![7],
        };
        assert_eq!(outcome.to_string(), "3 succeeded, 1 failed");
        assert!(!outcome.is_clean());
    }
}
