//! Storage abstractions for Letterpost.
//!
//! Defines the session store and progress tracker traits with their
//! in-memory implementations. SQLite implementations live in
//! letterpost-infra.

pub mod memory;
pub mod progress;
pub mod session_store;
