//! In-memory backend. Implements SchoolApi without a network.
//!
//! Used for the demo mode and by use-case tests.

pub mod school_api;

pub use school_api::{ApiCall, InMemorySchoolApi};
