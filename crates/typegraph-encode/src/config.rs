//! Configuration for a [`crate::Graph`], read from a TOML file:
//!
//! ```toml
//! [store]
//! path = "target/typegraph.db"
//!
//! [ingest]
//! intrinsic_packages = ["unsafe"]
//! ids = "random"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Location of the SQLite database.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Packages that are built into the checker. They always count as present and
    /// are never written.
    #[serde(default = "default_intrinsic_packages")]
    pub intrinsic_packages: Vec<String>,

    /// How identifiers for non-built-in entities are minted.
    #[serde(default)]
    pub ids: IdStrategy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            intrinsic_packages: default_intrinsic_packages(),
            ids: IdStrategy::default(),
        }
    }
}

/// Identifier minting strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random 128-bit identifiers.
    #[default]
    Random,
    /// A per-graph counter. Reproducible, but it restarts in every process, so a
    /// graph using it refuses to write into a store that is not empty.
    Sequential,
}

pub fn default_store_path() -> PathBuf {
    PathBuf::from("typegraph.db")
}

pub fn default_intrinsic_packages() -> Vec<String> {
    vec!["unsafe".to_string()]
}

impl GraphConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_intrinsic(&self, path: &str) -> bool {
        self.ingest.intrinsic_packages.iter().any(|p| p == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = GraphConfig::from_toml_str("").unwrap();
        assert_eq!(config, GraphConfig::default());
        assert_eq!(config.store.path, PathBuf::from("typegraph.db"));
        assert!(config.is_intrinsic("unsafe"));
        assert_eq!(config.ingest.ids, IdStrategy::Random);
    }

    #[test]
    fn sections_override_defaults() {
        let config = GraphConfig::from_toml_str(
            r#"
[store]
path = "/tmp/graph.db"

[ingest]
intrinsic_packages = ["unsafe", "C"]
ids = "sequential"
"#,
        )
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/graph.db"));
        assert!(config.is_intrinsic("C"));
        assert!(!config.is_intrinsic("fmt"));
        assert_eq!(config.ingest.ids, IdStrategy::Sequential);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GraphConfig::from_toml_str("[store]\nbackend = \"rocks\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
