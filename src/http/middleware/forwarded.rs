//! Trust of forwarding headers set by a proxy in front of this one.
//!
//! # Responsibilities
//! - Client address: `X-Forwarded-For` (first hop), `X-Real-IP`, `Forwarded: for=`,
//!   falling back to the socket peer
//! - Scheme: `X-Forwarded-Proto`, `X-Forwarded-Scheme`, `Forwarded: proto=`
//! - Host: `X-Forwarded-Host` replaces the `Host` header
//!
//! Malformed values are ignored; this layer never rejects a request.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::http::middleware::rebuild_uri;
use crate::routing::request_host;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_SCHEME: &str = "x-forwarded-scheme";
const X_REAL_IP: &str = "x-real-ip";

/// Address of the original client, as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

pub async fn forwarded_headers(mut req: Request<Body>, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());
    if let Some(addr) = client_addr(req.headers()).or(peer) {
        req.extensions_mut().insert(ClientAddr(addr));
    }

    if let Some(host) = header_str(req.headers(), X_FORWARDED_HOST)
        .and_then(|h| HeaderValue::from_str(h).ok())
    {
        req.headers_mut().insert(header::HOST, host);
    }

    if let Some(scheme) = scheme(req.headers()) {
        let authority = req
            .uri()
            .authority()
            .map(|a| a.as_str())
            .or_else(|| request_host(&req));
        if let Some(uri) = authority.and_then(|a| rebuild_uri(req.uri(), Some(&scheme), a)) {
            *req.uri_mut() = uri;
        }
    }

    next.run(req).await
}

/// Client address claimed by forwarding headers.
pub fn client_addr(headers: &HeaderMap) -> Option<String> {
    if let Some(fwd) = header_str(headers, X_FORWARDED_FOR) {
        let first = fwd.split(',').next().unwrap_or(fwd).trim();
        return Some(first.to_string()).filter(|a| !a.is_empty());
    }
    if let Some(real_ip) = header_str(headers, X_REAL_IP) {
        return Some(real_ip.to_string());
    }
    header_str(headers, header::FORWARDED.as_str())
        .and_then(|fwd| forwarded_param(fwd, "for"))
        .map(|addr| addr.trim_matches('"').to_string())
        .filter(|a| !a.is_empty())
}

/// Original scheme claimed by forwarding headers, lower-cased.
pub fn scheme(headers: &HeaderMap) -> Option<String> {
    if let Some(proto) = header_str(headers, X_FORWARDED_PROTO) {
        return Some(proto.to_ascii_lowercase());
    }
    if let Some(proto) = header_str(headers, X_FORWARDED_SCHEME) {
        return Some(proto.to_ascii_lowercase());
    }
    header_str(headers, header::FORWARDED.as_str())
        .and_then(|fwd| forwarded_param(fwd, "proto"))
        .map(|proto| proto.to_ascii_lowercase())
        .filter(|proto| proto == "http" || proto == "https")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// First `name=value` pair in an RFC 7239 `Forwarded` header.
fn forwarded_param<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .split([',', ';'])
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
}
