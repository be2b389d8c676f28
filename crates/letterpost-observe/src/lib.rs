//! Observability setup for Letterpost: structured logging via
//! `tracing-subscriber`, with optional OpenTelemetry span export.

pub mod tracing_setup;
