//! SQLite storage layer.
//!
//! Session store and progress tracker backed by SQLite with WAL mode and
//! split read/write connection pools.

pub mod pool;
pub mod progress;
pub mod session;
