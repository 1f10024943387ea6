use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use scholar_core::Error;
use scholar_rpc::ToolRegistry;

use crate::crossref::ScholarTool;

pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_POLITE_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_S: f64 = 10.0;

/// Declarative tool-enablement configuration: tool name -> settings.
///
/// Loaded once at startup and passed into `build_registry`; never read from
/// an implicit global path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ToolsConfig {
    pub tools: BTreeMap<String, ToolEntry>,
}

/// Per-tool settings. Absent keys fall back to the documented defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolEntry {
    #[serde(default)]
    pub enabled: bool,
    pub max_results: Option<u32>,
    pub polite_delay_ms: Option<u64>,
    pub timeout_s: Option<f64>,
    pub api_url: Option<String>,
}

impl ToolEntry {
    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    #[must_use]
    pub fn polite_delay_ms(&self) -> u64 {
        self.polite_delay_ms.unwrap_or(DEFAULT_POLITE_DELAY_MS)
    }

    #[must_use]
    pub fn timeout_s(&self) -> f64 {
        self.timeout_s.unwrap_or(DEFAULT_TIMEOUT_S)
    }
}

impl ToolsConfig {
    /// Load the configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `Error::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_yaml(&raw)
    }

    /// Parse the configuration from a YAML string.
    ///
    /// # Errors
    /// Returns `Error::Config` if the YAML is invalid.
    pub fn from_yaml(raw: &str) -> Result<Self, Error> {
        serde_yaml::from_str(raw)
            .map_err(|e| Error::Config(format!("invalid tool configuration: {e}")))
    }
}

/// Construct one tool per enabled config entry and register each under its
/// own declared method name.
///
/// Tool names resolve through a static table, so a typo in the config is a
/// startup failure rather than a runtime lookup surprise. Method-name
/// collisions likewise abort startup.
///
/// # Errors
/// Returns `Error::Config` for an unknown enabled tool or an invalid
/// setting, and `Error::DuplicateMethod` on a method collision.
pub fn build_registry(config: &ToolsConfig) -> Result<ToolRegistry, Error> {
    let mut registry = ToolRegistry::new();

    for (name, entry) in &config.tools {
        if !entry.enabled {
            tracing::debug!("tool '{name}' disabled, skipping");
            continue;
        }

        match name.as_str() {
            "scholar" => registry.register(Arc::new(ScholarTool::new(entry)?))?,
            other => {
                return Err(Error::Config(format!("unknown tool '{other}'")));
            }
        }
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_yaml_config() {
        let config = ToolsConfig::from_yaml(
            "scholar:\n  enabled: true\n  max_results: 5\n  polite_delay_ms: 0\n",
        )
        .unwrap();

        let entry = &config.tools["scholar"];
        assert!(entry.enabled);
        assert_eq!(entry.max_results(), 5);
        assert_eq!(entry.polite_delay_ms(), 0);
    }

    #[test]
    fn defaults_apply_for_missing_keys() {
        let entry = ToolEntry::default();
        assert_eq!(entry.max_results(), 10);
        assert_eq!(entry.polite_delay_ms(), 1000);
        assert!((entry.timeout_s() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let err = ToolsConfig::from_yaml("scholar: [not a mapping").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn disabled_tools_are_skipped() {
        let config = ToolsConfig::from_yaml("scholar:\n  enabled: false\n").unwrap();
        let registry = build_registry(&config).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn enabled_tool_registers_under_its_method() {
        let config =
            ToolsConfig::from_yaml("scholar:\n  enabled: true\n  polite_delay_ms: 0\n").unwrap();
        let registry = build_registry(&config).unwrap();
        assert!(registry.get("scholar.search_articles").is_some());
    }

    #[test]
    fn unknown_enabled_tool_fails_startup() {
        let config = ToolsConfig::from_yaml("mystery:\n  enabled: true\n").unwrap();
        let err = build_registry(&config).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("mystery")));
    }

    #[test]
    fn nonpositive_timeout_is_rejected() {
        let config =
            ToolsConfig::from_yaml("scholar:\n  enabled: true\n  timeout_s: -1.0\n").unwrap();
        let err = build_registry(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
