//! YAML parsing with error handling

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Parse YAML content into a typed value with nice error messages
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content)
        .map_err(|e| YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename)))
}

/// Parse YAML from a file path
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_yaml(&content, &path.display().to_string())
}
