//! Composition logic and port traits for Letterpost.
//!
//! This crate defines the "ports" (session store, progress tracker,
//! renderer) that the infrastructure layer implements, plus in-memory
//! adapters. It depends only on `letterpost-types` -- never on
//! `letterpost-infra` or any database/IO crate.

pub mod compose;
pub mod render;
pub mod storage;
