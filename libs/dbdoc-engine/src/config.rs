use serde::Deserialize;

use crate::error::EngineError;
use crate::materialize::MaterializeOptions;

/// Configuration file (TOML). Every field can also be given on the
/// command line, which takes precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbdocConfig {
    /// Path to the catalog snapshot (JSON).
    pub source: Option<String>,

    /// Output file for the rendered document.
    pub output: Option<String>,

    /// Replace an existing output file.
    #[serde(default)]
    pub overwrite: bool,

    /// Fail instead of descending past this many levels of nested objects.
    /// Unset means no limit.
    pub max_depth: Option<usize>,
}

impl DbdocConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn materialize_options(&self) -> MaterializeOptions {
        MaterializeOptions {
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let cfg = DbdocConfig::parse(
            r#"
            source = "catalog.json"
            output = "sales.xml"
            overwrite = true
            max_depth = 16
            "#,
        )
        .unwrap();
        assert_eq!(cfg.source.as_deref(), Some("catalog.json"));
        assert_eq!(cfg.output.as_deref(), Some("sales.xml"));
        assert!(cfg.overwrite);
        assert_eq!(cfg.materialize_options().max_depth, Some(16));
    }

    #[test]
    fn parse_empty_uses_defaults() {
        let cfg = DbdocConfig::parse("").unwrap();
        assert!(cfg.source.is_none());
        assert!(!cfg.overwrite);
        assert_eq!(cfg.materialize_options().max_depth, None);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let err = DbdocConfig::parse("format = \"html\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
