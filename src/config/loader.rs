//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GuardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without semantic validation.
pub fn parse_config(path: &Path) -> Result<GuardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GuardConfig, ConfigError> {
    let config = parse_config(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse the file if it exists, otherwise fall back to defaults.
///
/// Not validated: callers apply command-line overrides first and validate
/// the merged result once.
pub fn parse_config_or_default(path: &Path) -> Result<GuardConfig, ConfigError> {
    if path.exists() {
        parse_config(path)
    } else {
        Ok(GuardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alb-api-key.toml");
        fs::write(
            &path,
            r#"
[paths]
service = "api/serverless.yml"
output = "out/template.json"

[observability]
json = true
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.paths.service, PathBuf::from("api/serverless.yml"));
        assert_eq!(config.output_path(), &PathBuf::from("out/template.json"));
        assert_eq!(config.provider.expected, "aws");
        assert_eq!(config.observability.log_level, "info");
        assert!(config.observability.json);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_validation_errors_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alb-api-key.toml");
        fs::write(&path, "[provider]\nexpected = \"\"\n[observability]\nlog_level = \"loud\"\n")
            .unwrap();

        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = parse_config_or_default(Path::new("no-such-config.toml")).unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn test_parse_defers_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alb-api-key.toml");
        fs::write(&path, "[observability]\nlog_level = \"loud\"\n").unwrap();

        let mut config = parse_config_or_default(&path).unwrap();
        assert_eq!(config.observability.log_level, "loud");
        assert!(validate_config(&config).is_err());

        // An override fixes the merged result before it is validated.
        config.observability.log_level = "debug".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[paths\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}
