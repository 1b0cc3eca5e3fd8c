//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Server states (shutdown.rs):
//!     Created → Listening → ShuttingDown → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop signal consumed once by the main task
//!
//! In-flight work (inflight.rs):
//!     forward starts → guard taken → response body finished → guard dropped
//! ```
//!
//! # Design Decisions
//! - Stop accepting immediately on the stop signal, drain in-flight work
//! - Shutdown has a deadline: forced stop after `SHUTDOWN_GRACE`
//! - A forced stop is an error, reported with the number of operations lost

pub mod inflight;
pub mod shutdown;
pub mod signals;

pub use inflight::{InFlightGuard, InFlightTracker, OperationId};
pub use shutdown::{ServerState, ShutdownError, SHUTDOWN_GRACE};
pub use signals::stop_signal;
