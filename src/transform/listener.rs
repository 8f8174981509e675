//! Header condition for existing listener rules.

use serde_json::Value;

use crate::template::{CompiledTemplate, RuleCondition};
use crate::transform::enumerator::FunctionEventSpec;
use crate::transform::types::TransformError;

/// Append the `x-api-key` header condition to the event's listener rule.
///
/// Returns the name of the updated rule. Fails if the rule is missing or has
/// no `Properties.Conditions` list.
pub fn add_api_key_condition(
    spec: &FunctionEventSpec,
    template: &mut CompiledTemplate,
) -> Result<String, TransformError> {
    let name = spec.listener_rule_name();
    let condition = serde_json::to_value(RuleCondition::api_key_header(&spec.api_key))?;

    let resources = template
        .resources_mut()
        .ok_or(TransformError::ResourcesNotAnObject)?;

    let listener = resources
        .get_mut(&name)
        .ok_or_else(|| TransformError::MissingListenerRule {
            name: name.clone(),
            function: spec.function_name.clone(),
        })?;

    let conditions = listener
        .get_mut("Properties")
        .and_then(|properties| properties.get_mut("Conditions"))
        .and_then(Value::as_array_mut)
        .ok_or_else(|| TransformError::MalformedListenerRule {
            name: name.clone(),
            reason: "Properties.Conditions is not a list",
        })?;

    conditions.push(condition);

    tracing::info!(
        function = %spec.function_name,
        listener_rule = %name,
        "Added x-api-key condition"
    );
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{AlbConditions, OneOrMany};
    use serde_json::json;

    fn spec(api_key: OneOrMany<String>) -> FunctionEventSpec {
        FunctionEventSpec {
            function_name: "getUser".to_string(),
            priority: 1,
            listener_arn: None,
            conditions: AlbConditions::default(),
            actions: None,
            api_key,
        }
    }

    fn template(listener: Value) -> CompiledTemplate {
        CompiledTemplate::from_value(json!({
            "Resources": { "GetUserAlbListenerRule1": listener }
        }))
        .unwrap()
    }

    #[test]
    fn test_appends_exactly_one_condition() {
        let mut template = template(json!({
            "Properties": {
                "Conditions": [{ "Field": "path-pattern", "Values": ["/user"] }]
            }
        }));

        let name = add_api_key_condition(&spec("abc123".to_string().into()), &mut template).unwrap();
        assert_eq!(name, "GetUserAlbListenerRule1");

        let conditions = template.resource(&name).unwrap()["Properties"]["Conditions"]
            .as_array()
            .unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0], json!({ "Field": "path-pattern", "Values": ["/user"] }));
        assert_eq!(conditions[1]["HttpHeaderConfig"]["Values"], json!("abc123"));
    }

    #[test]
    fn test_list_api_key_kept_as_list() {
        let mut template = template(json!({ "Properties": { "Conditions": [] } }));
        let keys = OneOrMany::Many(vec!["k1".to_string(), "k2".to_string()]);

        add_api_key_condition(&spec(keys), &mut template).unwrap();
        let condition = &template.resource("GetUserAlbListenerRule1").unwrap()["Properties"]
            ["Conditions"][0];
        assert_eq!(condition["Field"], json!("http-header"));
        assert_eq!(condition["HttpHeaderConfig"]["HttpHeaderName"], json!("x-api-key"));
        assert_eq!(condition["HttpHeaderConfig"]["Values"], json!(["k1", "k2"]));
    }

    #[test]
    fn test_missing_listener_rule() {
        let mut template = CompiledTemplate::from_value(json!({ "Resources": {} })).unwrap();
        let err = add_api_key_condition(&spec("k".to_string().into()), &mut template).unwrap_err();
        assert!(matches!(err, TransformError::MissingListenerRule { .. }));
        assert_eq!(
            err.to_string(),
            "Listener rule GetUserAlbListenerRule1 for function getUser not found in compiled template"
        );
    }

    #[test]
    fn test_listener_without_conditions() {
        let mut template = template(json!({ "Properties": { "Priority": 1 } }));
        let err = add_api_key_condition(&spec("k".to_string().into()), &mut template).unwrap_err();
        assert!(matches!(err, TransformError::MalformedListenerRule { .. }));
    }
}
