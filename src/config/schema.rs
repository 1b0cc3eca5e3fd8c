//! Configuration schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Host name → target base URL.
    #[serde(deserialize_with = "null_as_empty")]
    pub mapping: BTreeMap<String, String>,
}

impl ProxyConfig {
    /// Build a config from `(host, target)` pairs.
    pub fn from_pairs<I, H, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (H, T)>,
        H: Into<String>,
        T: Into<String>,
    {
        Self {
            mapping: pairs
                .into_iter()
                .map(|(host, target)| (host.into(), target.into()))
                .collect(),
        }
    }
}

// `mapping:` with nothing after it is a YAML null, not a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}
