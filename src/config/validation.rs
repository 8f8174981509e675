//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty paths and provider names
//! - Reject unknown log levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GuardConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::GuardConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("provider.expected must not be empty")]
    EmptyProvider,

    #[error("paths.{0} must not be empty")]
    EmptyPath(&'static str),

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),

    /// Watch mode would re-trigger on its own output.
    #[error("watch mode needs paths.output to differ from paths.template")]
    OutputIsTemplate,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.provider.expected.trim().is_empty() {
        errors.push(ValidationError::EmptyProvider);
    }
    if config.paths.service.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPath("service"));
    }
    if config.paths.template.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPath("template"));
    }
    if matches!(&config.paths.output, Some(output) if output.as_os_str().is_empty()) {
        errors.push(ValidationError::EmptyPath("output"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Watch-mode checks, on top of an already validated config.
pub fn validate_watch(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    if config.output_path() == &config.paths.template {
        return Err(vec![ValidationError::OutputIsTemplate]);
    }
    Ok(())
}
