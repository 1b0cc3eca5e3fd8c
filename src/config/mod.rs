//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML)
//!     → loader.rs (read & deserialize)
//!     → ProxyConfig (host → target mapping, verbatim)
//!     → routing::RouteTable::from_config (normalized, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - An absent or empty `mapping` is valid and yields an always-404 proxy
//! - Target URLs are kept verbatim here; normalization belongs to routing

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::ProxyConfig;
