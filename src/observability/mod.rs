//! Observability subsystem.
//!
//! Structured logging through `tracing`. Every subsystem logs with fields
//! (`host`, `method`, `upstream`, `operation`) rather than formatted strings.

pub mod logging;

pub use logging::init_logging;
