//! Enumeration of API-key protected ALB events.
//!
//! # Responsibilities
//! - Walk functions, then each function's events, in declaration order
//! - Keep only `alb` sections with a non-empty `apiKey`
//! - Skip unreadable `alb` sections with a warning instead of failing

use indexmap::IndexMap;
use serde_json::Value;

use crate::service::{AlbConditions, AlbEventDefinition, FunctionDefinition, OneOrMany};
use crate::transform::naming::{self, INVALID_KEY_PRIORITY_OFFSET};

/// One API-key protected ALB event of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEventSpec {
    pub function_name: String,
    pub priority: u32,
    pub listener_arn: Option<Value>,
    pub conditions: AlbConditions,
    pub actions: Option<Value>,
    pub api_key: OneOrMany<String>,
}

impl FunctionEventSpec {
    /// Build a spec from a parsed `alb` section.
    ///
    /// Returns `None` when the section carries no usable `apiKey`.
    pub fn from_event(function_name: &str, event: AlbEventDefinition) -> Option<Self> {
        let api_key = event.api_key.filter(|key| !key.is_empty())?;
        Some(Self {
            function_name: function_name.to_string(),
            priority: event.priority,
            listener_arn: event.listener_arn,
            conditions: event.conditions.unwrap_or_default(),
            actions: event.actions,
            api_key,
        })
    }

    /// Listener rule compiled upstream for this event.
    pub fn listener_rule_name(&self) -> String {
        naming::listener_rule_name(&self.function_name, self.priority)
    }

    /// Priority used in the invalid-key rule's name.
    pub fn rule_priority(&self) -> u64 {
        INVALID_KEY_PRIORITY_OFFSET + u64::from(self.priority)
    }

    /// `Priority` property of the invalid-key rule.
    ///
    /// Twice `rule_priority`, so priority 1 yields 6002 while the rule name
    /// carries 3001. Deployed stacks depend on both numbers; keep them as
    /// they are.
    pub fn resource_priority(&self) -> u64 {
        2 * self.rule_priority()
    }

    /// Logical name of the invalid-key rule.
    pub fn invalid_key_rule_name(&self) -> String {
        naming::invalid_key_rule_name(&self.function_name, self.rule_priority())
    }
}

/// Collect every API-key protected ALB event, functions first, then events.
pub fn collect_api_key_events(
    functions: &IndexMap<String, FunctionDefinition>,
) -> Vec<FunctionEventSpec> {
    let mut specs = Vec::new();

    for (function_name, function) in functions {
        let before = specs.len();

        for alb in function.alb_sections() {
            let event: AlbEventDefinition = match serde_json::from_value(alb.clone()) {
                Ok(event) => event,
                Err(e) => {
                    // An unreadable section that names an apiKey leaves the
                    // function's listener rule without a header check.
                    tracing::warn!(
                        function = %function_name,
                        error = %e,
                        unprotected = alb.get("apiKey").is_some(),
                        "Skipping unreadable alb event"
                    );
                    continue;
                }
            };

            if let Some(spec) = FunctionEventSpec::from_event(function_name, event) {
                specs.push(spec);
            }
        }

        if specs.len() == before {
            tracing::debug!(function = %function_name, "No alb apiKey events");
        }
    }

    specs
}
