//! CSV attendance report. Uses the `csv` crate for quoting/escaping.
//!
//! Format: `No;Name;Status` (semicolon-delimited, opens cleanly in Turkish-locale
//! spreadsheets), followed by a blank row and one summary row.

use crate::domain::{AttendanceStore, DomainError, LessonSession};
use crate::ports::ReportPort;
use std::path::{Path, PathBuf};

/// Render the store as CSV in roster order.
pub fn attendance_to_csv(store: &AttendanceStore) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(["No", "Name", "Status"])?;
    for student in store.roster() {
        let status = store
            .status(student.id)
            .map(|s| s.label())
            .unwrap_or("-");
        wtr.write_record([student.number.as_str(), student.full_name.as_str(), status])?;
    }

    let s = store.summary();
    wtr.write_record([""])?;
    wtr.write_record([
        format!("total={}", s.total),
        format!("present={}", s.present),
        format!("absent={}", s.absent),
        format!("late={}", s.late),
    ])?;

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.error().to_string(),
        ))
    })?;
    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// Writes one file per lesson period: `<class>_<date>_<program>.csv`.
pub struct CsvReportWriter {
    dir: PathBuf,
}

impl CsvReportWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn file_name(session: &LessonSession) -> String {
        let safe = |s: &str| -> String {
            s.chars()
                .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
                .collect()
        };
        format!(
            "{}_{}_{}.csv",
            safe(&session.class_id),
            session.date.format("%Y-%m-%d"),
            safe(&session.program_id)
        )
    }
}

impl ReportPort for CsvReportWriter {
    fn write_attendance_report(
        &self,
        session: &LessonSession,
        store: &AttendanceStore,
    ) -> Result<PathBuf, DomainError> {
        let csv = attendance_to_csv(store).map_err(|e| DomainError::Report(e.to_string()))?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Report(format!("create report dir: {}", e)))?;
        let path = self.dir.join(Self::file_name(session));
        std::fs::write(&path, csv)
            .map_err(|e| DomainError::Report(format!("write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttendanceStatus, Student};
    use crate::test_support::helpers::session;
    use std::collections::HashMap;

    fn store() -> AttendanceStore {
        let roster = vec![
            Student {
                id: 1,
                number: "101".to_string(),
                full_name: "Ayşe Yılmaz".to_string(),
            },
            Student {
                id: 2,
                number: "102".to_string(),
                full_name: "Demir; Mehmet".to_string(),
            },
        ];
        let mut server = HashMap::new();
        server.insert(2, Some(AttendanceStatus::Late));
        AttendanceStore::init(roster, &server)
    }

    #[test]
    fn test_csv_rows_and_summary() {
        let csv = attendance_to_csv(&store()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "No;Name;Status");
        assert_eq!(lines[1], "101;Ayşe Yılmaz;Present");
        // delimiter inside a field is quoted
        assert_eq!(lines[2], "102;\"Demir; Mehmet\";Late");
        assert_eq!(lines[4], "total=2;present=1;absent=0;late=1");
    }

    #[test]
    fn test_file_name_is_filesystem_safe() {
        let mut s = session();
        s.class_id = "5/A".to_string();
        assert_eq!(CsvReportWriter::file_name(&s), "5_A_2024-03-11_991.csv");
    }

    #[test]
    fn test_write_report_to_dir() {
        let dir = std::env::temp_dir().join(format!("lesson-sync-report-{}", std::process::id()));
        let writer = CsvReportWriter::new(&dir);
        let path = writer.write_attendance_report(&session(), &store()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("No;Name;Status"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
