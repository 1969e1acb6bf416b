//! Configuration management for schemagraph.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`SCHEMAGRAPH__TOOL__*`)
//! 2. Config file (`schemagraph.toml`, `[tool]` section)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;
use crate::types::{PluginType, TemplateType};

/// Settings for building, narrowing, rendering, and persisting graphs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ToolConfig {
    /// Adapter used when a request names none. `None` builds the plain base graph.
    #[serde(default)]
    pub default_plugin: Option<PluginType>,

    /// Template used by `render` when none is given.
    #[serde(default)]
    pub template: TemplateType,

    /// Collect parent-ward edges when narrowing (default: true).
    #[serde(default = "default_true")]
    pub bubble_up: bool,

    /// Keep edges to nodes outside the relevant set (default: false).
    #[serde(default)]
    pub include_unfocused_neighbors: bool,

    /// Where the snapshot store keeps its file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_true() -> bool {
    true
}

fn default_snapshot_path() -> String {
    "./schemagraph.json".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_plugin: None,
            template: TemplateType::default(),
            bubble_up: default_true(),
            include_unfocused_neighbors: false,
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl ToolConfig {
    /// Load from `<file_prefix>.toml` (optional) overlaid by environment variables.
    ///
    /// A missing `[tool]` section yields the defaults.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("SCHEMAGRAPH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match cfg.get::<ToolConfig>("tool") {
            Ok(c) => Ok(c),
            Err(config::ConfigError::NotFound(_)) => {
                tracing::debug!(file_prefix, "No [tool] configuration found, using defaults");
                Ok(ToolConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.default_plugin, None);
        assert_eq!(config.template, TemplateType::MermaidErd);
        assert!(config.bubble_up);
        assert!(!config.include_unfocused_neighbors);
        assert_eq!(config.snapshot_path, "./schemagraph.json");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let config = ToolConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_load_tool_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemagraph.toml");
        std::fs::write(
            &path,
            r#"
[tool]
default_plugin = "lineage"
template = "graphviz"
bubble_up = false
snapshot_path = "/tmp/graph.json"
"#,
        )
        .unwrap();

        let prefix = dir.path().join("schemagraph");
        let config = ToolConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.default_plugin, Some(PluginType::Lineage));
        assert_eq!(config.template, TemplateType::GraphvizDiGraph);
        assert!(!config.bubble_up);
        assert!(!config.include_unfocused_neighbors);
        assert_eq!(config.snapshot_path, "/tmp/graph.json");
    }
}
