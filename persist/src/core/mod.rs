//! Deterministic, pure logic for the persisted path set.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! strings and sets and return deterministic outputs suitable for tests.

pub mod codec;
pub mod types;
