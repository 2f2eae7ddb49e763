//! physdrill-core: Problem generators, answer checking, and performance
//! tracking.
//!
//! This crate defines the problem model, the per-topic generators that
//! draw round-number parameters, and the grading and worksheet logic the
//! rest of physdrill builds on.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generators;
pub mod grading;
pub mod model;
pub mod performance;
pub mod responses;
pub mod session;
pub mod traits;
pub mod worksheet;
