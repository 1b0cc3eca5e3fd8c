//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one task per connection)
//!     → middleware/forwarded.rs (trust X-Forwarded-*)
//!     → middleware/host.rs (URI authority := Host)
//!     → routing (host lookup)
//!     → forward.rs (stream to backend and back) | response.rs (unmapped)
//!     → Send to client
//! ```

pub mod forward;
pub mod middleware;
pub mod response;
pub mod server;

pub use forward::{Forwarder, HttpClient};
pub use response::{Reason, UNMAPPED_BODY, X_SIRUP_HOST, X_SIRUP_PROTO, X_SIRUP_REASON, X_SIRUP_REMOTE};
pub use server::{build_app, AppState, HttpServer, RunningServer};
