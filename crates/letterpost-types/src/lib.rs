//! Shared domain types for Letterpost.
//!
//! Letter fields and sections, composition sessions, the assembled
//! document, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod document;
pub mod error;
pub mod letter;
pub mod session;
