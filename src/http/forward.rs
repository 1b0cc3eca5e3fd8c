//! Forwarding of one request/response round trip to a backend.
//!
//! # Responsibilities
//! - Compose `target + escaped path [+ "?" + raw query]`
//! - Stream the inbound body to the backend and the backend body to the client
//! - Add `x-sirup-host`, `x-sirup-proto`, `x-sirup-remote`; copy every other
//!   header additively, multiplicity preserved
//! - Map construction failures to 500 and transport failures to 502
//!
//! # Design Decisions
//! - One pooled client for the whole process, cloned into handlers
//! - Bodies are coupled directly: no buffering, bounded by hyper's own frames
//! - No timeout here: dropping the handler future (client gone) drops the
//!   outbound request with it
//! - Status and headers are committed before body streaming; a mid-stream
//!   failure can only truncate the body

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, Response, Uri},
};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::middleware::ClientAddr;
use crate::http::response::{
    proxy_error, Reason, X_SIRUP_HOST, X_SIRUP_PROTO, X_SIRUP_REMOTE,
};
use crate::lifecycle::InFlightTracker;
use crate::routing::request_host;

/// Shared outbound client with connection pooling.
pub type HttpClient = Client<HttpConnector, Body>;

/// Executes forwarding operations against backends.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: HttpClient,
    in_flight: InFlightTracker,
}

impl Forwarder {
    pub fn new(in_flight: InFlightTracker) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self::with_client(client, in_flight)
    }

    pub fn with_client(client: HttpClient, in_flight: InFlightTracker) -> Self {
        Self { client, in_flight }
    }

    /// Forward `req` to `target_base` and relay the backend's answer.
    pub async fn forward(&self, target_base: &str, req: Request<Body>) -> Response<Body> {
        let guard = self.in_flight.track();
        let operation = guard.id();
        let method = req.method().clone();
        let target = outbound_target(target_base, req.uri());

        tracing::debug!(
            operation = %operation,
            method = %method,
            uri = %req.uri(),
            upstream = %target,
            "Forwarding request"
        );

        let outbound = match build_outbound(&target, req) {
            Ok(outbound) => outbound,
            Err(e) => {
                tracing::error!(
                    operation = %operation,
                    method = %method,
                    upstream = %target,
                    error = %e,
                    "Failed to create request"
                );
                return proxy_error(Reason::CreateRequestFailed);
            }
        };

        let response: Response<Incoming> = match self.client.request(outbound).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    operation = %operation,
                    method = %method,
                    upstream = %target,
                    error = %e,
                    "Request to backend failed"
                );
                return proxy_error(Reason::SendRequestFailed);
            }
        };

        let (parts, body) = response.into_parts();

        // The guard rides along with the body so the operation counts as
        // in flight until the last byte has been relayed.
        let body = body.map_err(move |e| {
            tracing::error!(operation = %guard.id(), error = %e, "Failed to copy response body");
            e
        });

        let mut relayed = Response::new(Body::new(body));
        *relayed.status_mut() = parts.status;
        copy_headers(&parts.headers, relayed.headers_mut());
        relayed
    }
}

/// `target_base + escaped path`, plus `?query` when the query is non-empty.
pub fn outbound_target(target_base: &str, uri: &Uri) -> String {
    let mut target = format!("{target_base}{}", uri.path());
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// Build the outbound request: same method, diagnostic headers first, then
/// every inbound header except `Host`, which the client derives from the target.
fn build_outbound(target: &str, req: Request<Body>) -> Result<Request<Body>, axum::http::Error> {
    let host = request_host(&req).unwrap_or_default().to_owned();
    let proto = req.uri().scheme_str().unwrap_or_default().to_owned();
    let remote = req
        .extensions()
        .get::<ClientAddr>()
        .map(|ClientAddr(addr)| addr.clone())
        .unwrap_or_default();

    let (parts, body) = req.into_parts();

    let body = body.map_err(|e| {
        tracing::error!(error = %e, "Failed to copy request body");
        e
    });

    let mut builder = Request::builder()
        .method(parts.method)
        .uri(target)
        .header(X_SIRUP_HOST, host)
        .header(X_SIRUP_PROTO, proto)
        .header(X_SIRUP_REMOTE, remote);

    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            if *name != header::HOST {
                headers.append(name.clone(), value.clone());
            }
        }
    }

    builder.body(Body::new(body))
}

fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from.iter() {
        to.append(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Method};

    #[test]
    fn target_composition() {
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(outbound_target("http://test.local/path", &uri), "http://test.local/path/");

        let uri: Uri = "/body-data?a=b&c=d".parse().unwrap();
        assert_eq!(
            outbound_target("http://test.local/path", &uri),
            "http://test.local/path/body-data?a=b&c=d"
        );

        let uri: Uri = "/with-query/?blah=blotz".parse().unwrap();
        assert_eq!(
            outbound_target("http://t", &uri),
            "http://t/with-query/?blah=blotz"
        );
    }

    #[test]
    fn empty_query_is_dropped() {
        let uri: Uri = "/x?".parse().unwrap();
        assert_eq!(outbound_target("http://t", &uri), "http://t/x");
    }

    #[test]
    fn escaped_path_is_not_reencoded() {
        let uri: Uri = "/a%20b/%2F?q=%26".parse().unwrap();
        assert_eq!(outbound_target("http://t", &uri), "http://t/a%20b/%2F?q=%26");
    }

    #[test]
    fn outbound_request_headers() {
        let mut req = Request::builder()
            .method(Method::PUT)
            .uri("http://front.local/x")
            .header("Host", "front.local")
            .header("x-multi", "one")
            .header("x-multi", "two")
            .header(X_SIRUP_HOST, "client-supplied")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(ClientAddr("192.0.2.1:5000".into()));

        let outbound = build_outbound("http://back.local/x", req).unwrap();

        assert_eq!(outbound.method(), Method::PUT);
        assert_eq!(outbound.uri(), "http://back.local/x");
        assert!(outbound.headers().get(header::HOST).is_none());

        let multi: Vec<_> = outbound.headers().get_all("x-multi").iter().collect();
        assert_eq!(multi, [&HeaderValue::from_static("one"), &HeaderValue::from_static("two")]);

        let hosts: Vec<_> = outbound.headers().get_all(X_SIRUP_HOST).iter().collect();
        assert_eq!(
            hosts,
            [&HeaderValue::from_static("front.local"), &HeaderValue::from_static("client-supplied")]
        );
        assert_eq!(outbound.headers()[X_SIRUP_PROTO], "http");
        assert_eq!(outbound.headers()[X_SIRUP_REMOTE], "192.0.2.1:5000");
    }

    #[test]
    fn malformed_target_fails_construction() {
        let req = Request::builder()
            .uri("/")
            .header("Host", "h")
            .body(Body::empty())
            .unwrap();
        assert!(build_outbound("http://bad target/", req).is_err());
    }
}
