//! spotlight-core — Session state machine, roll pool, stopwatch and scoring.
//!
//! This crate defines the attendance data model, the draw/review/save cycle
//! and the storage trait that the rest of spotlight builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod model;
pub mod pool;
pub mod session;
pub mod stopwatch;
pub mod summary;
pub mod traits;

pub use error::SpotlightError;
