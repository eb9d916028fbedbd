//! lintgate configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::TrustError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for the trust engine and its adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintgateConfig {
    /// Decision store location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,

    /// Show the status even when it is `ok`.
    #[serde(default)]
    pub always_show_status: bool,

    /// Publish the pending-confirmation diagnostic on the active document.
    #[serde(default = "default_show_pending_diagnostic")]
    pub show_pending_diagnostic: bool,

    /// Directory of the file this configuration was loaded from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_show_pending_diagnostic() -> bool {
    true
}

impl LintgateConfig {
    /// Config file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lintgate.jsonc", ".lintgate.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            state_file: None,
            always_show_status: false,
            show_pending_diagnostic: true,
            base_dir: None,
        }
    }

    /// Finds a config file directly inside `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TrustError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| TrustError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON (comments allowed) with schema validation.
    pub fn from_json(json: &str) -> Result<Self, TrustError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| TrustError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(TrustError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| TrustError::config(format!("Invalid config: {}", e)))
    }

    /// Resolves the configured store path against the config directory.
    pub fn state_path(&self) -> Option<PathBuf> {
        let file = PathBuf::from(self.state_file.as_ref()?);
        match &self.base_dir {
            Some(base) if file.is_relative() => Some(base.join(file)),
            _ => Some(file),
        }
    }
}

impl Default for LintgateConfig {
    fn default() -> Self {
        Self::new()
    }
}
