//! Service definition schema.
//!
//! Mirrors the subset of a serverless service file that describes functions and
//! their ALB events.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root of a service definition file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceDefinition {
    /// Service name, used only for logging.
    pub service: Option<String>,

    /// Target cloud provider.
    pub provider: ProviderDefinition,

    /// Functions keyed by name, in declaration order.
    pub functions: IndexMap<String, FunctionDefinition>,
}

/// Provider section of the service definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderDefinition {
    /// Provider name (e.g., "aws").
    pub name: Option<String>,

    /// Deployment stage, when declared.
    pub stage: Option<String>,

    /// Deployment region, when declared.
    pub region: Option<String>,
}

/// A single function and the events that trigger it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FunctionDefinition {
    pub handler: Option<String>,

    /// Event records in declaration order. Each record is a single-key map
    /// such as `{ "alb": { ... } }` or `{ "http": { ... } }`.
    pub events: Vec<Value>,
}

impl FunctionDefinition {
    /// Raw `alb` sections of this function's events, in declaration order.
    pub fn alb_sections(&self) -> impl Iterator<Item = &Value> {
        self.events.iter().filter_map(|event| event.get("alb"))
    }
}

/// The `alb` section of a function event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbEventDefinition {
    /// Listener rule priority assigned by the service author.
    pub priority: u32,

    /// Listener reference, usually an ARN string or a `{"Ref": ...}` intrinsic.
    #[serde(default)]
    pub listener_arn: Option<Value>,

    /// Routing conditions for the function.
    #[serde(default)]
    pub conditions: Option<AlbConditions>,

    /// Replacement actions for the invalid-key rule, passed through untouched.
    #[serde(default)]
    pub actions: Option<Value>,

    /// Header value(s) a request must carry in `x-api-key`.
    #[serde(default, deserialize_with = "scalar_strings")]
    pub api_key: Option<OneOrMany<String>>,
}

/// Routing conditions of an ALB event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlbConditions {
    #[serde(deserialize_with = "scalar_strings")]
    pub path: Option<OneOrMany<String>>,
    #[serde(deserialize_with = "scalar_strings")]
    pub method: Option<OneOrMany<String>>,
}

/// Read a string or list of strings, accepting unquoted YAML numbers and
/// booleans as their textual form.
fn scalar_strings<'de, D>(deserializer: D) -> Result<Option<OneOrMany<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    fn scalar<E: serde::de::Error>(value: Value) -> Result<String, E> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(E::custom(format!(
                "expected a string, number or boolean, found {}",
                other
            ))),
        }
    }

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(scalar::<D::Error>)
            .collect::<Result<Vec<_>, _>>()
            .map(|values| Some(OneOrMany::Many(values))),
        Some(value) => scalar::<D::Error>(value).map(|s| Some(OneOrMany::One(s))),
    }
}

/// A value that may be written as a scalar or as a list.
///
/// Serializes back in the shape it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    /// Coerce to a list: a scalar becomes a single-element list.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

impl OneOrMany<String> {
    /// Returns true for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            OneOrMany::One(value) => value.is_empty(),
            OneOrMany::Many(values) => values.is_empty(),
        }
    }

    /// Returns true only for an empty scalar string. An empty list is a value.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, OneOrMany::One(value) if value.is_empty())
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}
