//! Renderer implementations.

pub mod text;
