//! Server lifecycle states and shutdown outcomes.

use std::time::Duration;

use thiserror::Error;

/// Time in-flight operations get to finish once a shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Lifecycle of the listening server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Listener bound, not yet accepting.
    Created,
    /// Accept loop running on its own task.
    Listening,
    /// No new connections; in-flight operations draining.
    ShuttingDown,
    /// Accept loop gone.
    Stopped,
}

impl std::fmt::Display for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServerState::Created => "created",
            ServerState::Listening => "listening",
            ServerState::ShuttingDown => "shutting-down",
            ServerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Why the server did not stop cleanly.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The grace period elapsed with work still running.
    #[error("graceful shutdown timed out after {grace:?} with {in_flight} operation(s) in flight")]
    Timeout { grace: Duration, in_flight: u64 },

    /// The accept loop failed on its own.
    #[error("server transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The accept loop returned without being asked to stop.
    #[error("server stopped accepting connections unexpectedly")]
    UnexpectedExit,

    /// The accept loop task panicked or was cancelled.
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ShutdownError {
    /// A forced stop after the grace period, as opposed to a transport failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ShutdownError::Timeout { .. })
    }
}
