//! API-key transform for ALB listener rules.
//!
//! # Data Flow
//! ```text
//! ServiceDefinition.functions
//!     → enumerator.rs (FunctionEventSpec per alb event with an apiKey)
//!     → for each spec, in order:
//!         listener.rs (append x-api-key condition to <Fn>AlbListenerRule<p>)
//!         rule.rs     (insert <Fn>InvalidApiKeyRule<3000+p> returning 403)
//!     → TransformReport
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, the caller hands in the template
//! - First missing listener rule aborts the run; earlier mutations are not
//!   rolled back, the caller must discard the document on error
//! - Functions without an alb apiKey event leave the template untouched

pub mod enumerator;
pub mod listener;
pub mod naming;
pub mod rule;
pub mod types;

pub use enumerator::{collect_api_key_events, FunctionEventSpec};
pub use listener::add_api_key_condition;
pub use rule::{add_invalid_api_key_rule, build_invalid_api_key_rule};
pub use types::{TransformError, TransformReport};

use crate::service::ServiceDefinition;
use crate::template::CompiledTemplate;

/// Rewrite the template so every API-key protected ALB event rejects requests
/// without a matching `x-api-key` header.
pub fn apply(
    service: &ServiceDefinition,
    template: &mut CompiledTemplate,
) -> Result<TransformReport, TransformError> {
    let specs = collect_api_key_events(&service.functions);
    let mut report = TransformReport::default();

    for spec in &specs {
        let listener_rule = add_api_key_condition(spec, template)?;
        report.listener_rules_updated.push(listener_rule);

        let rule = add_invalid_api_key_rule(spec, template)?;
        report.invalid_key_rules_created.push(rule);
    }

    tracing::info!(
        listener_rules = report.listener_rules_updated.len(),
        invalid_key_rules = report.invalid_key_rules_created.len(),
        "API key rules applied"
    );
    Ok(report)
}

/// The events `apply` would act on, without touching any template.
pub fn plan(service: &ServiceDefinition) -> Vec<FunctionEventSpec> {
    collect_api_key_events(&service.functions)
}
