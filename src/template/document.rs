//! The compiled template document.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur reading or writing a template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root must be a JSON object.
    #[error("Template root is not a JSON object")]
    NotAnObject,
}

/// A compiled infrastructure template.
///
/// Holds the document for the duration of one transform; the caller owns it
/// before and after.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    document: Map<String, Value>,
}

impl CompiledTemplate {
    /// Wrap a parsed document. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, TemplateError> {
        match value {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(TemplateError::NotAnObject),
        }
    }

    /// Unwrap into the underlying JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }

    /// Borrow the whole document.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// The `Resources` section, if present and an object.
    pub fn resources(&self) -> Option<&Map<String, Value>> {
        self.document.get("Resources").and_then(Value::as_object)
    }

    /// Look up a resource by logical name.
    pub fn resource(&self, name: &str) -> Option<&Value> {
        self.resources().and_then(|resources| resources.get(name))
    }

    /// Mutable access to `Resources`, created empty when missing.
    ///
    /// Returns `None` if `Resources` exists but is not an object.
    pub fn resources_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.document
            .entry("Resources")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
    }
}

/// Load a compiled template from a JSON file.
pub fn load_template(path: &Path) -> Result<CompiledTemplate, TemplateError> {
    let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content)?;
    let template = CompiledTemplate::from_value(value)?;

    tracing::debug!(
        path = %path.display(),
        resources = template.resources().map(Map::len).unwrap_or(0),
        "Compiled template loaded"
    );
    Ok(template)
}

/// Write a compiled template to a JSON file.
///
/// The document goes to a temporary file in the target's directory which is
/// then renamed over the target, so a failed write leaves the old file intact.
pub fn save_template(
    path: &Path,
    template: &CompiledTemplate,
    pretty: bool,
) -> Result<(), TemplateError> {
    let mut content = if pretty {
        serde_json::to_string_pretty(template.document())?
    } else {
        serde_json::to_string(template.document())?
    };
    content.push('\n');

    let io_error = |source: std::io::Error| TemplateError::Io {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    staged.write_all(content.as_bytes()).map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(path).map_err(|e| io_error(e.error))?;

    tracing::debug!(path = %path.display(), "Compiled template written");
    Ok(())
}
