//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod attendance;
pub mod entities;
pub mod errors;
pub mod search;
pub mod selection;

pub use attendance::AttendanceStore;
pub use entities::{
    AttendanceEntry, AttendanceStatus, AttendanceSummary, LessonSession, ObjectiveNode, Student,
    SubmitOutcome,
};
pub use errors::DomainError;
pub use search::filter_nodes;
pub use selection::{ObjectiveSelection, SelectionKey};
