//! Pipeline configuration.

use std::path::Path;

use brepgraph_graph::KernelKind;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for converting a body into a graph.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration:
///
/// ```
/// use brepgraph::{GraphConfig, KernelKind};
///
/// let config = GraphConfig::from_toml_str("kernel = \"winged_edge\"").unwrap();
/// assert_eq!(config.kernel, KernelKind::WingedEdge);
/// assert!(config.check_loops);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Wiring kernel for graph edges.
    pub kernel: KernelKind,
    /// Verify that each wire forms exactly one cycle in `next`.
    pub check_loops: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            kernel: KernelKind::SimpleEdge,
            check_loops: true,
        }
    }
}

impl GraphConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
