//! Infrastructure layer for Letterpost.
//!
//! Contains implementations of the port traits defined in `letterpost-core`:
//! SQLite session and progress storage, the plain-text letter renderer,
//! configuration loading, and data directory layout.

pub mod config;
pub mod filesystem;
pub mod render;
pub mod sqlite;
