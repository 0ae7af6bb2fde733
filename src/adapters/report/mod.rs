//! Attendance report. Implements ReportPort with CSV files.

pub mod csv_report;

pub use csv_report::{CsvReportWriter, attendance_to_csv};
