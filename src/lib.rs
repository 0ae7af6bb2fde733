//! lesson-sync: attendance and curriculum objective (kazanım) recording for one
//! lesson period, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

mod test_support;
