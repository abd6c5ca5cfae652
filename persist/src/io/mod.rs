//! I/O helpers: storage location, durable reads/writes, change notification.

pub mod config;
pub mod notify;
pub mod store;
