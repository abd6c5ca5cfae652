//! Persisted set of lab paths backed by a single text file.
//!
//! The only mutating operation is [`toggle::ToggleService::toggle`]: add a path
//! if it is absent, remove it if present. State is read fresh from disk on every
//! call and written back atomically.
//!
//! - **[`core`]**: Pure logic (document codec, set membership). No I/O.
//! - **[`io`]**: Storage location, tolerant reads, atomic writes, and change
//!   notification.
//!
//! [`toggle`] composes the two into the service the CLI calls.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod toggle;
