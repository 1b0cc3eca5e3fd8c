//! Structured logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a given `-v` count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "sirup=info,tower_http=info",
        1 => "sirup=debug,tower_http=debug",
        _ => "sirup=trace,tower_http=trace",
    }
}

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert!(default_filter(0).contains("sirup=info"));
        assert!(default_filter(1).contains("sirup=debug"));
        assert!(default_filter(5).contains("sirup=trace"));
    }
}
