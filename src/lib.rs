//! Host-based reverse proxy library.
//!
//! Requests are routed by their `Host` header through a static
//! host → target mapping and streamed to the target and back.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::{ShutdownError, SHUTDOWN_GRACE};
pub use routing::RouteTable;
