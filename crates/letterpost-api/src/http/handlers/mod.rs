//! HTTP request handlers for the REST API.

pub mod compose;
pub mod stats;
