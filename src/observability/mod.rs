//! # Observability Infrastructure
//!
//! Structured logging for the rotation service via the tracing ecosystem.
//! Rotation phases log with operation context (application ID, secret name,
//! key ID); secret values never appear in any log record.

mod logging;

pub use logging::init_logging;
