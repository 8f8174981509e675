//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! alb-api-key.toml (optional)
//!     → loader.rs (parse & deserialize, or defaults when absent)
//!     → CLI overrides (--service, --template, --output)
//!     → validation.rs (semantic checks, once, on the merged result)
//!     → GuardConfig (validated, immutable)
//!
//! In watch mode:
//!     watcher.rs detects a change to the service or template file
//!     → transform re-applied with the same GuardConfig
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the tool runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, parse_config_or_default, ConfigError};
pub use schema::{GuardConfig, ObservabilityConfig, OutputConfig, PathsConfig, ProviderConfig};
