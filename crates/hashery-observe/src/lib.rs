//! Observability setup for Hashery: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
