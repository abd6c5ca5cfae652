//! Stable exit codes for the `persist` CLI.

/// Command succeeded.
pub const OK: i32 = 0;
/// Storage location could not be resolved or the state file could not be written.
pub const FAILURE: i32 = 1;
/// The lab path argument was empty.
pub const INVALID_INPUT: i32 = 2;
