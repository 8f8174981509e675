//! Service definition loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::service::definition::ServiceDefinition;

/// Errors that can occur while reading a service definition.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither YAML nor JSON.
    #[error("Unsupported service file extension: {0}")]
    UnsupportedFormat(String),
}

/// Load a service definition, choosing the parser from the file extension.
pub fn load_service(path: &Path) -> Result<ServiceDefinition, ServiceError> {
    let content = fs::read_to_string(path).map_err(|source| ServiceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let service = match extension.as_str() {
        "yml" | "yaml" => parse_yaml(&content)?,
        "json" => parse_json(&content)?,
        other => return Err(ServiceError::UnsupportedFormat(other.to_string())),
    };

    tracing::debug!(
        path = %path.display(),
        service = service.service.as_deref().unwrap_or("<unnamed>"),
        functions = service.functions.len(),
        "Service definition loaded"
    );

    Ok(service)
}

/// Parse a YAML service definition.
pub fn parse_yaml(content: &str) -> Result<ServiceDefinition, ServiceError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Parse a JSON service definition.
pub fn parse_json(content: &str) -> Result<ServiceDefinition, ServiceError> {
    Ok(serde_json::from_str(content)?)
}
