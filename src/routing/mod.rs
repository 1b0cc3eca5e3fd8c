//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ProxyConfig.mapping
//!     → strip trailing slashes from targets
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (Host header)
//!     → router.rs (host lookup)
//!     → Return: Forward(target) or Unmapped
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime (shared without locks)
//! - Exact host match: no wildcards, no port stripping, no case folding
//! - Deterministic: same host always yields the same decision

pub mod router;
pub mod table;

pub use router::{request_host, RouteMatch, Router};
pub use table::RouteTable;
