//! Infrastructure adapters. Implement outbound ports and drive the inbound one.
//!
//! HTTP backend, in-memory backend, CSV reports, terminal UI. Map errors to DomainError.

pub mod http;
pub mod memory;
pub mod report;
pub mod ui;
