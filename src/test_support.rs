//! Shared test fixtures for use-case and adapter tests.

#[cfg(test)]
pub(crate) mod helpers {
    use crate::domain::{AttendanceStatus, LessonSession, ObjectiveNode, Student};
    use crate::ports::RosterRecord;
    use chrono::NaiveDate;

    pub fn session() -> LessonSession {
        LessonSession {
            class_id: "5-A".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            period_id: "3".to_string(),
            program_id: "991".to_string(),
            subject: "Matematik".to_string(),
        }
    }

    pub fn student(id: i64) -> Student {
        Student {
            id,
            number: (100 + id).to_string(),
            full_name: format!("Öğrenci {}", id),
        }
    }

    pub fn record(id: i64, status: Option<AttendanceStatus>) -> RosterRecord {
        RosterRecord {
            student: student(id),
            status,
        }
    }

    pub fn sayilar() -> ObjectiveNode {
        ObjectiveNode {
            id: 5,
            title: "Sayılar".to_string(),
            subtopics: vec!["Toplama".to_string(), "Çıkarma".to_string()],
        }
    }
}
