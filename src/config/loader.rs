//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a YAML document. Empty and comment-only documents yield the default config.
pub fn parse_config(content: &str) -> Result<ProxyConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ProxyConfig::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    if value.is_null() {
        return Ok(ProxyConfig::default());
    }

    serde_yaml::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn empty_file_yields_empty_mapping() {
        let file = write_config("");
        assert_eq!(load_config(file.path()).unwrap(), ProxyConfig::default());
    }

    #[test]
    fn comment_only_file_yields_empty_mapping() {
        let file = write_config("# nothing mapped yet\n");
        assert_eq!(load_config(file.path()).unwrap(), ProxyConfig::default());
    }

    #[test]
    fn empty_mapping_key_yields_empty_mapping() {
        let file = write_config("\nmapping:\n");
        assert!(load_config(file.path()).unwrap().mapping.is_empty());
    }

    #[test]
    fn single_host() {
        let file = write_config("\nmapping:\n  foo: http://bar.com/baz\n");
        assert_eq!(
            load_config(file.path()).unwrap(),
            ProxyConfig::from_pairs([("foo", "http://bar.com/baz")])
        );
    }

    #[test]
    fn multiple_hosts_keep_targets_verbatim() {
        let file = write_config(
            "\nmapping:\n  abc: http://def.com/\n  xyz: https://hello.world/xyz/\n",
        );
        assert_eq!(
            load_config(file.path()).unwrap(),
            ProxyConfig::from_pairs([
                ("abc", "http://def.com/"),
                ("xyz", "https://hello.world/xyz/"),
            ])
        );
    }

    #[test]
    fn flow_style_mapping() {
        let config = parse_config("mapping: {a.local: 'http://a:1', b.local: 'http://b:2'}").unwrap();
        assert_eq!(config.mapping.len(), 2);
        assert_eq!(config.mapping["b.local"], "http://b:2");
    }

    #[test]
    fn scalar_mapping_is_parse_error() {
        let file = write_config("mapping: a string value");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse_config("listen: 8080\nmapping:\n  a: http://b\n").unwrap();
        assert_eq!(config.mapping.len(), 1);
    }
}
