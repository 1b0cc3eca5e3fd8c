//! Responses generated by the proxy itself.
//!
//! # Responsibilities
//! - Name the diagnostic headers exchanged with backends and clients
//! - Answer unmapped hosts (the default handler)
//! - Map forwarding failures to status codes with an `x-sirup-reason`
//!
//! Backend responses never carry `x-sirup-reason` unless the backend set it.

use axum::{
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

/// Why the proxy answered instead of the backend. Client responses only.
pub const X_SIRUP_REASON: &str = "x-sirup-reason";
/// Original `Host` of the inbound request. Outbound requests only.
pub const X_SIRUP_HOST: &str = "x-sirup-host";
/// Original URL scheme of the inbound request. Outbound requests only.
pub const X_SIRUP_PROTO: &str = "x-sirup-proto";
/// Original client address of the inbound request. Outbound requests only.
pub const X_SIRUP_REMOTE: &str = "x-sirup-remote";

/// Body of every unmapped-host response.
pub const UNMAPPED_BODY: &str = "This page does not exist";

/// Value of the `x-sirup-reason` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The outbound request could not be built; the backend was not contacted.
    CreateRequestFailed,
    /// The backend could not be reached or the exchange failed before a response.
    SendRequestFailed,
    /// No route for the request's host.
    Unmapped,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::CreateRequestFailed => "create-request-failed",
            Reason::SendRequestFailed => "send-request-failed",
            Reason::Unmapped => "unmapped",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Reason::CreateRequestFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Reason::SendRequestFailed => StatusCode::BAD_GATEWAY,
            Reason::Unmapped => StatusCode::NOT_FOUND,
        }
    }
}

pub fn proxy_error(reason: Reason) -> Response {
    (reason.status(), [(X_SIRUP_REASON, reason.as_str())]).into_response()
}

/// Default handler for hosts without a route.
pub fn unmapped<B>(req: &Request<B>) -> Response {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "Unmapped request");
    let reason = Reason::Unmapped;
    (reason.status(), [(X_SIRUP_REASON, reason.as_str())], UNMAPPED_BODY).into_response()
}
