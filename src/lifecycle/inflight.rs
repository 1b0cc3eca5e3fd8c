//! In-flight forwarding operation tracking.
//!
//! # Responsibilities
//! - Generate unique operation IDs for tracing
//! - Count forwarding operations that have not yet finished streaming
//! - Report the count when a shutdown has to be forced

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global counter for operation IDs. Only uniqueness matters, so relaxed ordering is enough.
static OPERATION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a forwarding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(u64);

impl OperationId {
    pub fn new() -> Self {
        Self(OPERATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

/// Counts forwarding operations in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlightTracker {
    active_count: Arc<AtomicU64>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new operation. The returned guard decrements the count on drop.
    pub fn track(&self) -> InFlightGuard {
        self.active_count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            active_count: Arc::clone(&self.active_count),
            id: OperationId::new(),
        }
    }

    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }
}

/// Held for the whole lifetime of one forwarding operation, body streaming included.
#[derive(Debug)]
pub struct InFlightGuard {
    active_count: Arc<AtomicU64>,
    id: OperationId,
}

impl InFlightGuard {
    pub fn id(&self) -> OperationId {
        self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active_count.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(operation = %self.id, "Forwarding operation finished");
    }
}
