//! HTTP adapter. Implements SchoolApi against the school backend's JSON API.

pub mod client;
pub mod dto;
pub mod response;

pub use client::HttpSchoolApi;
