//! Host-based request dispatch.
//!
//! # Responsibilities
//! - Determine the request host from the `Host` header
//! - Look the host up in the route table
//! - Return the matched target or an explicit `Unmapped`

use axum::http::{header, Request};

use crate::routing::table::RouteTable;

/// Outcome of routing a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    /// Forward to this target base URL.
    Forward(&'a str),
    /// No route for the host; answered by the default handler.
    Unmapped,
}

/// Stateless router over an immutable route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Route a request by its host.
    pub fn match_request<B>(&self, req: &Request<B>) -> RouteMatch<'_> {
        request_host(req)
            .and_then(|host| self.table.resolve(host))
            .map_or(RouteMatch::Unmapped, RouteMatch::Forward)
    }
}

/// The host a request is addressed to: the `Host` header, falling back to the
/// URI authority for requests that carry none (HTTP/2).
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
}
