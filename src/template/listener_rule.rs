//! Listener-rule resources emitted into the template.
//!
//! Serialized field names follow the `AWS::ElasticLoadBalancingV2::ListenerRule`
//! resource schema.

use serde::Serialize;
use serde_json::Value;

use crate::service::OneOrMany;

/// Resource type tag for ALB listener rules.
pub const LISTENER_RULE_TYPE: &str = "AWS::ElasticLoadBalancingV2::ListenerRule";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Status code returned when the API key is missing or wrong.
pub const FORBIDDEN_STATUS: u16 = 403;

/// Body returned when the API key is missing or wrong.
pub const FORBIDDEN_BODY: &str = r#"{ "message": "Forbidden: invalid api key" }"#;

/// A listener-rule resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListenerRule {
    #[serde(rename = "Type")]
    pub resource_type: &'static str,
    pub properties: ListenerRuleProperties,
}

impl ListenerRule {
    pub fn new(properties: ListenerRuleProperties) -> Self {
        Self {
            resource_type: LISTENER_RULE_TYPE,
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListenerRuleProperties {
    /// Omitted when the event declared no listener.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_arn: Option<Value>,
    pub priority: u64,
    pub conditions: Vec<RuleCondition>,
    pub actions: RuleActions,
}

/// A single rule condition, tagged by its `Field`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Field")]
pub enum RuleCondition {
    #[serde(rename = "path-pattern")]
    PathPattern {
        #[serde(rename = "PathPatternConfig")]
        config: ValuesConfig,
    },

    #[serde(rename = "http-request-method")]
    HttpRequestMethod {
        #[serde(rename = "HttpRequestMethodConfig")]
        config: ValuesConfig,
    },

    #[serde(rename = "http-header")]
    HttpHeader {
        #[serde(rename = "HttpHeaderConfig")]
        config: HttpHeaderConfig,
    },
}

impl RuleCondition {
    /// Path condition; a scalar path becomes a one-element list.
    pub fn path_pattern(path: &OneOrMany<String>) -> Self {
        RuleCondition::PathPattern {
            config: ValuesConfig {
                values: path.to_vec(),
            },
        }
    }

    /// Method condition; a scalar method becomes a one-element list.
    pub fn http_request_method(method: &OneOrMany<String>) -> Self {
        RuleCondition::HttpRequestMethod {
            config: ValuesConfig {
                values: method.to_vec(),
            },
        }
    }

    /// `x-api-key` header condition. Values are kept in the shape given.
    pub fn api_key_header(api_key: &OneOrMany<String>) -> Self {
        RuleCondition::HttpHeader {
            config: HttpHeaderConfig {
                http_header_name: API_KEY_HEADER.to_string(),
                values: api_key.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValuesConfig {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpHeaderConfig {
    pub http_header_name: String,
    pub values: OneOrMany<String>,
}

/// Rule actions: either copied from the service definition or synthesized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleActions {
    Supplied(Value),
    Synthesized(Vec<RuleAction>),
}

impl RuleActions {
    /// The single 403 fixed response used when no actions are supplied.
    pub fn forbidden() -> Self {
        RuleActions::Synthesized(vec![RuleAction::FixedResponse {
            config: FixedResponseConfig {
                status_code: FORBIDDEN_STATUS,
                content_type: "application/json".to_string(),
                message_body: FORBIDDEN_BODY.to_string(),
            },
        }])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "Type")]
pub enum RuleAction {
    #[serde(rename = "fixed-response")]
    FixedResponse {
        #[serde(rename = "FixedResponseConfig")]
        config: FixedResponseConfig,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FixedResponseConfig {
    pub status_code: u16,
    pub content_type: String,
    pub message_body: String,
}
