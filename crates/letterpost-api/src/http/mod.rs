//! HTTP/REST API layer for Letterpost.
//!
//! Axum-based REST API at `/api/v1/` with envelope response format and
//! CORS support. Each owner id in the path addresses one composition.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
