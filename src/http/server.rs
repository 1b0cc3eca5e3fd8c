//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum router: every path and method goes to `proxy_handler`
//! - Wire up middleware (tracing, forwarded headers, host normalization)
//! - Dispatch to the forwarder or the unmapped handler
//! - Run the accept loop on its own task and stop it within a deadline

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::http::forward::Forwarder;
use crate::http::middleware::{forwarded_headers, normalize_host};
use crate::http::response;
use crate::lifecycle::{InFlightTracker, ServerState, ShutdownError};
use crate::routing::{RouteMatch, RouteTable, Router as ProxyRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    pub fn new(routes: RouteTable, in_flight: InFlightTracker) -> Self {
        Self {
            router: Arc::new(ProxyRouter::new(routes)),
            forwarder: Arc::new(Forwarder::new(in_flight)),
        }
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers run outermost first: trace → forwarded headers → host normalization → handler.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .with_state(state)
        .layer(middleware::from_fn(normalize_host))
        .layer(middleware::from_fn(forwarded_headers))
        .layer(TraceLayer::new_for_http())
}

/// Route by host, then forward or answer as unmapped.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match state.router.match_request(&request) {
        RouteMatch::Forward(target) => state.forwarder.forward(target, request).await,
        RouteMatch::Unmapped => response::unmapped(&request),
    }
}

/// A bound proxy server that has not started accepting yet.
pub struct HttpServer {
    listener: TcpListener,
    app: Router,
    in_flight: InFlightTracker,
}

impl HttpServer {
    /// Create a server for `routes` on an already-bound listener.
    pub fn new(listener: TcpListener, routes: RouteTable) -> Self {
        let in_flight = InFlightTracker::new();
        let app = build_app(AppState::new(routes, in_flight.clone()));
        Self {
            listener,
            app,
            in_flight,
        }
    }

    pub fn state(&self) -> ServerState {
        ServerState::Created
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Spawn the accept loop. Each connection is served on its own task.
    pub fn start(self) -> std::io::Result<RunningServer> {
        let Self {
            listener,
            app,
            in_flight,
        } = self;
        let addr = listener.local_addr()?;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        tracing::info!(address = %addr, "Start listening");

        let task = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        Ok(RunningServer {
            addr,
            stop: Some(stop_tx),
            task,
            state: ServerState::Listening,
            in_flight,
        })
    }
}

/// Handle to a server whose accept loop is running.
pub struct RunningServer {
    addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
    state: ServerState,
    in_flight: InFlightTracker,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Forwarding operations currently running, body streaming included.
    pub fn in_flight(&self) -> u64 {
        self.in_flight.active_count()
    }

    /// Resolve if the accept loop exits without having been asked to.
    ///
    /// Always yields an error; after it resolves the server is `Stopped` and
    /// must not be shut down again.
    pub async fn closed(&mut self) -> ShutdownError {
        let result = (&mut self.task).await;
        self.state = ServerState::Stopped;
        match result {
            Ok(Ok(())) => ShutdownError::UnexpectedExit,
            Ok(Err(e)) => ShutdownError::Transport(e),
            Err(e) => ShutdownError::Join(e),
        }
    }

    /// Stop accepting, then wait up to `grace` for in-flight work to finish.
    ///
    /// On expiry only the accept loop is aborted. Connections it already
    /// handed off keep running until they finish or the runtime shuts down.
    pub async fn shutdown(mut self, grace: Duration) -> Result<(), ShutdownError> {
        self.state = ServerState::ShuttingDown;
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        tracing::info!(
            address = %self.addr,
            in_flight = self.in_flight(),
            "Shutting down"
        );

        let outcome = tokio::time::timeout(grace, &mut self.task).await;
        self.state = ServerState::Stopped;

        match outcome {
            Ok(Ok(Ok(()))) => {
                tracing::info!("Server successfully shut down");
                Ok(())
            }
            Ok(Ok(Err(e))) => {
                tracing::error!(error = %e, "Server failed while shutting down");
                Err(ShutdownError::Transport(e))
            }
            Ok(Err(e)) => Err(ShutdownError::Join(e)),
            Err(_) => {
                let in_flight = self.in_flight();
                self.task.abort();
                tracing::error!(
                    grace = ?grace,
                    in_flight,
                    "Graceful shutdown timed out, abandoning in-flight connections"
                );
                Err(ShutdownError::Timeout { grace, in_flight })
            }
        }
    }
}
