//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse},
    Router,
};
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use sirup::http::RunningServer;
use sirup::{HttpServer, ProxyConfig, RouteTable};

pub const BACKEND_BODY: &str = "Hello, Test!";

/// A request as the backend saw it.
#[derive(Debug)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Serve `app` on an ephemeral port.
pub async fn start_backend(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Backend that records every request and answers with a fixed response:
/// 201 for POST, 200 otherwise, two `x-multi` values and `x-purpose: test`.
pub async fn start_recording_backend() -> (SocketAddr, mpsc::UnboundedReceiver<Captured>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().fallback(record).with_state(tx);
    (start_backend(app).await, rx)
}

async fn record(
    State(tx): State<mpsc::UnboundedSender<Captured>>,
    request: Request<Body>,
) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let status = if parts.method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let _ = tx.send(Captured {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    });

    (
        status,
        AppendHeaders([
            ("x-purpose", "test"),
            ("x-multi", "a"),
            ("x-multi", "b"),
        ]),
        BACKEND_BODY,
    )
}

/// Start the proxy on an ephemeral port with the given mapping.
pub async fn start_proxy<H, T>(mapping: impl IntoIterator<Item = (H, T)>) -> RunningServer
where
    H: Into<String>,
    T: Into<String>,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let routes = RouteTable::from_config(&ProxyConfig::from_pairs(mapping));
    HttpServer::new(listener, routes).start().unwrap()
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Client that never goes through an environment proxy and never pools.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// Wait for the next captured request.
pub async fn next_capture(rx: &mut mpsc::UnboundedReceiver<Captured>) -> Captured {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("backend saw no request")
        .expect("backend channel closed")
}
