//! spotlight-store — On-disk storage for the attendance log.

pub mod jsonl;

pub use jsonl::JsonlStore;
