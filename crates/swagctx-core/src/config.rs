use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Per-run compiler configuration loaded from `.swagctx.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Output-language profile (`default` or `swift`).
    pub profile: String,
    /// Extra identifiers to escape on top of the profile's own set.
    pub reserved: Vec<String>,
    /// Replaces the profile's escape marker.
    pub escape_prefix: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            reserved: Vec::new(),
            escape_prefix: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagctx.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<CompilerConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: CompilerConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagctx configuration
profile: default      # default | swift

# Additional type names to escape, on top of the profile's reserved words.
reserved: []
  # - Response
  # - Request

# Marker used to escape a reserved name (profile default: "_").
# escape_prefix: Api
"#
}
