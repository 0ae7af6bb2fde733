//! Progress bar for the attendance submit batch.

use crate::domain::{AttendanceEntry, DomainError};
use indicatif::{ProgressBar, ProgressStyle};

pub fn submit_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    bar.set_style(style);
    bar
}

/// Advance `bar` for one finished entry, naming failures in the message line.
pub fn record(bar: &ProgressBar, entry: &AttendanceEntry, result: &Result<(), DomainError>) {
    if let Err(e) = result {
        bar.println(format!("  ✗ student {}: {}", entry.student_id, e));
    }
    bar.set_message(format!("student {}", entry.student_id));
    bar.inc(1);
}
