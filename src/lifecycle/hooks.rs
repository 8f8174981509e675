//! Plugin registration and deploy hooks.
//!
//! # Responsibilities
//! - Refuse to register against any provider other than the expected one
//! - Describe the plugin's command and lifecycle events
//! - Dispatch hook names to the transform

use thiserror::Error;

use crate::service::{ProviderDefinition, ServiceDefinition};
use crate::template::CompiledTemplate;
use crate::transform::{self, TransformError, TransformReport};

/// Hook run right before the stack is submitted.
pub const BEFORE_DEPLOY_HOOK: &str = "before:deploy:deploy";

/// Human-readable plugin description.
pub const USAGE: &str = "Add listener rule to HTTP Listener for x-api-key header";

/// Lifecycle events declared for the `deploy` command.
pub const DEPLOY_LIFECYCLE_EVENTS: &[&str] = &["resources", "functions"];

/// Errors raised by the plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The service targets a different cloud provider.
    #[error("This plugin must be used with {expected} (configured provider: {actual})")]
    ProviderMismatch { expected: String, actual: String },

    #[error("Unknown hook: {0}")]
    UnknownHook(String),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Command metadata exposed at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommands {
    pub usage: &'static str,
    pub deploy_lifecycle_events: &'static [&'static str],
}

/// The ALB API-key plugin, registered against one provider.
#[derive(Debug, Clone)]
pub struct AlbApiKeyPlugin {
    provider: String,
}

impl AlbApiKeyPlugin {
    /// Register the plugin, checking the service's provider.
    pub fn new(provider: &ProviderDefinition, expected: &str) -> Result<Self, PluginError> {
        match provider.name.as_deref() {
            Some(name) if name.eq_ignore_ascii_case(expected) => {
                tracing::debug!(provider = %name, "Plugin registered");
                Ok(Self {
                    provider: name.to_string(),
                })
            }
            other => Err(PluginError::ProviderMismatch {
                expected: expected.to_string(),
                actual: other.unwrap_or("<none>").to_string(),
            }),
        }
    }

    /// Provider the plugin was registered against.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn commands(&self) -> PluginCommands {
        PluginCommands {
            usage: USAGE,
            deploy_lifecycle_events: DEPLOY_LIFECYCLE_EVENTS,
        }
    }

    /// Hook names this plugin handles.
    pub fn hooks(&self) -> &'static [&'static str] {
        &[BEFORE_DEPLOY_HOOK]
    }

    /// Run a lifecycle hook against the compiled template.
    pub fn run_hook(
        &self,
        hook: &str,
        service: &ServiceDefinition,
        template: &mut CompiledTemplate,
    ) -> Result<TransformReport, PluginError> {
        match hook {
            BEFORE_DEPLOY_HOOK => {
                tracing::info!(hook, "Running hook");
                Ok(transform::apply(service, template)?)
            }
            other => Err(PluginError::UnknownHook(other.to_string())),
        }
    }
}
