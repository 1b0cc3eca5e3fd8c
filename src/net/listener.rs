//! TCP listener binding.

use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to listen on {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the proxy port on all interfaces.
pub async fn bind_port(port: u16) -> Result<TcpListener, ListenerError> {
    bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await
}

/// Bind a specific address.
pub async fn bind(address: SocketAddr) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind { address, source })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::debug!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}
