//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! --port
//!     → listener.rs (bind 0.0.0.0:<port>)
//!     → http::HttpServer (accept loop, one task per connection)
//! ```
//!
//! # Design Decisions
//! - Bind failures are fatal and never retried
//! - Plain TCP only; TLS is terminated in front of the proxy, if at all

pub mod listener;

pub use listener::{bind, bind_port, ListenerError};
