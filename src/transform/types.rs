//! Transform errors and results.

use thiserror::Error;

/// Errors that abort the transform.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The upstream compiler did not produce the expected listener rule.
    #[error("Listener rule {name} for function {function} not found in compiled template")]
    MissingListenerRule { name: String, function: String },

    /// The listener rule exists but has no `Properties.Conditions` list.
    #[error("Listener rule {name} is malformed: {reason}")]
    MalformedListenerRule { name: String, reason: &'static str },

    /// The template's `Resources` section is not an object.
    #[error("Template Resources section is not an object")]
    ResourcesNotAnObject,

    #[error("Failed to serialize resource: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resources touched by one transform run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Listener rules that gained an `x-api-key` header condition.
    pub listener_rules_updated: Vec<String>,

    /// Invalid-key rules inserted into the template.
    pub invalid_key_rules_created: Vec<String>,
}

impl TransformReport {
    /// Returns true if the run changed nothing.
    pub fn is_empty(&self) -> bool {
        self.listener_rules_updated.is_empty() && self.invalid_key_rules_created.is_empty()
    }
}
