//! Compiled infrastructure template subsystem.
//!
//! # Data Flow
//! ```text
//! .serverless/cloudformation-template-update-stack.json
//!     → document.rs (load, wrap as CompiledTemplate)
//!     → transform (mutates Resources in place)
//!     → document.rs (save to output path)
//!
//! listener_rule.rs
//!     → typed listener-rule resources and conditions
//!     → serialized into the document as plain JSON
//! ```
//!
//! # Design Decisions
//! - The document stays an untyped JSON tree; only what we emit is typed
//! - Object key order is preserved from input to output

pub mod document;
pub mod listener_rule;

pub use document::{load_template, save_template, CompiledTemplate, TemplateError};
pub use listener_rule::{
    HttpHeaderConfig, ListenerRule, ListenerRuleProperties, RuleActions, RuleCondition,
};
