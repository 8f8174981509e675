//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

use alb_api_key_guard::GuardConfig;

/// A service with one protected function, one open function and one
/// protected function with custom actions.
pub const SERVICE_YAML: &str = r#"
service: users-api
provider:
  name: aws
  region: eu-west-1
functions:
  getUser:
    handler: src/user.get
    events:
      - alb:
          listenerArn:
            Ref: HttpListener
          priority: 1
          apiKey: abc123
          conditions:
            path: /user
  health:
    handler: src/health.get
    events:
      - alb:
          listenerArn:
            Ref: HttpListener
          priority: 2
          conditions:
            path: /health
  listOrders:
    handler: src/orders.list
    events:
      - http:
          path: /orders
      - alb:
          listenerArn:
            Ref: HttpListener
          priority: 3
          apiKey: [k1, k2]
          conditions:
            path: [/orders, /orders/*]
            method: GET
          actions:
            - Type: fixed-response
              FixedResponseConfig:
                StatusCode: 401
                ContentType: text/plain
                MessageBody: Unauthorized
"#;

/// A listener rule as the upstream compiler emits it.
pub fn compiled_listener_rule(priority: u32, target_group: &str, path: &str) -> Value {
    json!({
        "Type": "AWS::ElasticLoadBalancingV2::ListenerRule",
        "Properties": {
            "Actions": [{ "Type": "forward", "TargetGroupArn": { "Ref": target_group } }],
            "Conditions": [{ "Field": "path-pattern", "Values": [path] }],
            "ListenerArn": { "Ref": "HttpListener" },
            "Priority": priority
        }
    })
}

/// Compiled template matching `SERVICE_YAML`.
pub fn compiled_template() -> Value {
    json!({
        "AWSTemplateFormatVersion": "2010-09-09",
        "Resources": {
            "GetUserAlbListenerRule1": compiled_listener_rule(1, "GetUserAlbTargetGroup", "/user"),
            "HealthAlbListenerRule2": compiled_listener_rule(2, "HealthAlbTargetGroup", "/health"),
            "ListOrdersAlbListenerRule3": compiled_listener_rule(3, "ListOrdersAlbTargetGroup", "/orders")
        },
        "Outputs": {}
    })
}

/// A project directory with service and template files on disk.
pub struct Project {
    pub dir: TempDir,
    pub config: GuardConfig,
}

impl Project {
    pub fn new(service_yaml: &str, template: &Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let service = dir.path().join("serverless.yml");
        let template_path = dir.path().join("cloudformation-template-update-stack.json");

        fs::write(&service, service_yaml).unwrap();
        fs::write(&template_path, serde_json::to_string_pretty(template).unwrap()).unwrap();

        let mut config = GuardConfig::default();
        config.paths.service = service;
        config.paths.template = template_path;

        Self { dir, config }
    }

    /// Write output to a separate file instead of in place.
    #[allow(dead_code)]
    pub fn with_output(mut self, name: &str) -> Self {
        self.config.paths.output = Some(self.dir.path().join(name));
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.output_path().clone()
    }

    pub fn read_output(&self) -> Value {
        serde_json::from_str(&fs::read_to_string(self.output_path()).unwrap()).unwrap()
    }
}
