//! Host normalization.
//!
//! Upstream components do not always agree on where the host lives: the
//! request line may be origin-form with no authority, or carry an authority
//! that differs from the `Host` header. Before routing, the URI authority is
//! overwritten with the request host so both views agree.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::http::middleware::rebuild_uri;
use crate::routing::request_host;

/// Make the URI authority match the request host. Never fails.
pub async fn normalize_host(mut req: Request<Body>, next: Next) -> Response {
    if let Some(uri) = normalized_uri(&req) {
        *req.uri_mut() = uri;
    }
    next.run(req).await
}

fn normalized_uri<B>(req: &Request<B>) -> Option<axum::http::Uri> {
    let host = request_host(req)?;
    if req.uri().authority().map(|a| a.as_str()) == Some(host) {
        return None;
    }
    rebuild_uri(req.uri(), None, host)
}
