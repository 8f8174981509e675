//! Rewrites compiled ALB listener rules so that API-key protected functions
//! reject requests without a matching `x-api-key` header.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod service;
pub mod template;
pub mod transform;

pub use config::GuardConfig;
pub use lifecycle::AlbApiKeyPlugin;
pub use service::ServiceDefinition;
pub use template::CompiledTemplate;
pub use transform::{apply, TransformError, TransformReport};
