//! Immutable host → target lookup table.

use std::collections::HashMap;

use crate::config::ProxyConfig;

/// Host name → target base URL, with trailing slashes removed from targets.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Compile the configured mapping.
    pub fn from_config(config: &ProxyConfig) -> Self {
        if config.mapping.is_empty() {
            tracing::warn!(
                "The 'mapping' section of the configuration is empty, no forwarding will be done"
            );
        }

        let routes = config
            .mapping
            .iter()
            .map(|(host, target)| {
                let target = normalize_target(target);
                tracing::info!(host = %host, upstream = %format!("{target}/"), "Mapping host");
                (host.clone(), target)
            })
            .collect();

        Self { routes }
    }

    /// Look up the target base URL for a host, verbatim.
    pub fn resolve(&self, host: &str) -> Option<&str> {
        self.routes.get(host).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip trailing slashes so `target + path` never yields `//`.
fn normalize_target(target: &str) -> String {
    target.trim_end_matches('/').to_string()
}
