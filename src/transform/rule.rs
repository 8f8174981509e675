//! Invalid-key rule synthesis.
//!
//! The rule carries the function's routing conditions without the header
//! check, at a lower precedence than the function's own rule, so requests
//! that fall through get a 403 (or the event's own `actions`).

use crate::template::{
    CompiledTemplate, ListenerRule, ListenerRuleProperties, RuleActions, RuleCondition,
};
use crate::transform::enumerator::FunctionEventSpec;
use crate::transform::types::TransformError;

/// Build the invalid-key rule for an event.
pub fn build_invalid_api_key_rule(spec: &FunctionEventSpec) -> ListenerRule {
    let mut conditions = Vec::new();

    if let Some(path) = spec.conditions.path.as_ref().filter(|p| !p.is_empty_string()) {
        conditions.push(RuleCondition::path_pattern(path));
    }
    if let Some(method) = spec.conditions.method.as_ref().filter(|m| !m.is_empty_string()) {
        conditions.push(RuleCondition::http_request_method(method));
    }

    let actions = match &spec.actions {
        Some(actions) => RuleActions::Supplied(actions.clone()),
        None => RuleActions::forbidden(),
    };

    ListenerRule::new(ListenerRuleProperties {
        listener_arn: spec.listener_arn.clone(),
        priority: spec.resource_priority(),
        conditions,
        actions,
    })
}

/// Insert the invalid-key rule into the template's resources.
///
/// Returns the rule's logical name. An existing resource under that name is
/// replaced in place.
pub fn add_invalid_api_key_rule(
    spec: &FunctionEventSpec,
    template: &mut CompiledTemplate,
) -> Result<String, TransformError> {
    let name = spec.invalid_key_rule_name();
    let rule = serde_json::to_value(build_invalid_api_key_rule(spec))?;

    let resources = template
        .resources_mut()
        .ok_or(TransformError::ResourcesNotAnObject)?;

    if resources.insert(name.clone(), rule).is_some() {
        tracing::warn!(rule = %name, "Replaced existing resource with invalid api key rule");
    }

    tracing::info!(
        function = %spec.function_name,
        rule = %name,
        priority = spec.resource_priority(),
        "Created invalid api key rule"
    );
    Ok(name)
}
