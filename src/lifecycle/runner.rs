//! File-level driver used by the CLI.
//!
//! # Responsibilities
//! - Locate the service definition and compiled template from config
//! - Register the plugin and run `before:deploy:deploy` once
//! - Write the output only after the whole transform succeeded

use thiserror::Error;

use crate::config::GuardConfig;
use crate::lifecycle::hooks::{AlbApiKeyPlugin, PluginError, BEFORE_DEPLOY_HOOK};
use crate::service::{load_service, ServiceError};
use crate::template::{load_template, save_template, TemplateError};
use crate::transform::{self, FunctionEventSpec, TransformReport};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Service definition: {0}")]
    Service(#[from] ServiceError),

    #[error("Compiled template: {0}")]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// Transform the configured template and write the result.
pub fn apply_files(config: &GuardConfig) -> Result<TransformReport, RunError> {
    let service = load_service(&config.paths.service)?;
    let plugin = AlbApiKeyPlugin::new(&service.provider, &config.provider.expected)?;
    let mut template = load_template(&config.paths.template)?;

    let report = plugin.run_hook(BEFORE_DEPLOY_HOOK, &service, &mut template)?;

    let output = config.output_path();
    if report.is_empty() && output == &config.paths.template {
        tracing::info!("No alb apiKey events, template left untouched");
        return Ok(report);
    }

    save_template(output, &template, config.output.pretty)?;
    tracing::info!(output = %output.display(), "Template written");
    Ok(report)
}

/// List the events that `apply_files` would act on.
pub fn plan_files(config: &GuardConfig) -> Result<Vec<FunctionEventSpec>, RunError> {
    let service = load_service(&config.paths.service)?;
    AlbApiKeyPlugin::new(&service.provider, &config.provider.expected)?;
    Ok(transform::plan(&service))
}
