//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the compiled template written by `serverless package`.
pub const DEFAULT_TEMPLATE_PATH: &str = ".serverless/cloudformation-template-update-stack.json";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Provider the service must target.
    pub provider: ProviderConfig,

    /// Input and output file locations.
    pub paths: PathsConfig,

    /// Output formatting.
    pub output: OutputConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl GuardConfig {
    /// Where the transformed template is written.
    pub fn output_path(&self) -> &PathBuf {
        self.paths.output.as_ref().unwrap_or(&self.paths.template)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Expected provider name (e.g., "aws").
    pub expected: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            expected: "aws".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Service definition (YAML or JSON).
    pub service: PathBuf,

    /// Compiled template to transform.
    pub template: PathBuf,

    /// Output file. Defaults to rewriting `template` in place.
    pub output: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            service: PathBuf::from("serverless.yml"),
            template: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the written template.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
