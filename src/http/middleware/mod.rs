//! Request normalization applied before routing.
//!
//! ```text
//! forwarded.rs (trust X-Forwarded-* / Forwarded)
//!     → host.rs (URI authority := Host header)
//!     → router
//! ```

pub mod forwarded;
pub mod host;

pub use forwarded::{forwarded_headers, ClientAddr};
pub use host::normalize_host;

use axum::http::uri::{Authority, Scheme, Uri};

/// Rebuild `uri` with the given authority and scheme (existing scheme, else `http`).
/// `None` when the parts do not form a valid URI; callers keep the original then.
pub(crate) fn rebuild_uri(uri: &Uri, scheme: Option<&str>, authority: &str) -> Option<Uri> {
    let mut parts = uri.clone().into_parts();
    parts.authority = Some(Authority::try_from(authority).ok()?);
    parts.scheme = match scheme {
        Some(scheme) => Some(Scheme::try_from(scheme).ok()?),
        None => parts.scheme.or(Some(Scheme::HTTP)),
    };
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some("/".parse().ok()?);
    }
    Uri::from_parts(parts).ok()
}
