//! End-to-end tests: service file + compiled template on disk → output file.

use pretty_assertions::assert_eq;
use serde_json::json;

use alb_api_key_guard::lifecycle::{apply_files, plan_files, PluginError, RunError};
use alb_api_key_guard::TransformError;

mod common;

use common::{compiled_template, Project, SERVICE_YAML};

#[test]
fn test_apply_in_place() {
    let project = Project::new(SERVICE_YAML, &compiled_template());

    let report = apply_files(&project.config).unwrap();
    assert_eq!(
        report.listener_rules_updated,
        vec!["GetUserAlbListenerRule1", "ListOrdersAlbListenerRule3"]
    );
    assert_eq!(
        report.invalid_key_rules_created,
        vec!["GetUserInvalidApiKeyRule3001", "ListOrdersInvalidApiKeyRule3003"]
    );

    let output = project.read_output();
    let resources = output["Resources"].as_object().unwrap();
    assert_eq!(
        resources.keys().collect::<Vec<_>>(),
        vec![
            "GetUserAlbListenerRule1",
            "HealthAlbListenerRule2",
            "ListOrdersAlbListenerRule3",
            "GetUserInvalidApiKeyRule3001",
            "ListOrdersInvalidApiKeyRule3003",
        ]
    );

    // Open function untouched.
    assert_eq!(
        resources["HealthAlbListenerRule2"],
        compiled_template()["Resources"]["HealthAlbListenerRule2"]
    );

    assert_eq!(
        resources["GetUserInvalidApiKeyRule3001"],
        json!({
            "Type": "AWS::ElasticLoadBalancingV2::ListenerRule",
            "Properties": {
                "ListenerArn": { "Ref": "HttpListener" },
                "Priority": 6002,
                "Conditions": [
                    { "Field": "path-pattern", "PathPatternConfig": { "Values": ["/user"] } }
                ],
                "Actions": [{
                    "Type": "fixed-response",
                    "FixedResponseConfig": {
                        "StatusCode": 403,
                        "ContentType": "application/json",
                        "MessageBody": "{ \"message\": \"Forbidden: invalid api key\" }"
                    }
                }]
            }
        })
    );
}

#[test]
fn test_list_values_and_custom_actions() {
    let project = Project::new(SERVICE_YAML, &compiled_template()).with_output("out.json");
    apply_files(&project.config).unwrap();

    let output = project.read_output();
    let listener = &output["Resources"]["ListOrdersAlbListenerRule3"]["Properties"]["Conditions"];
    assert_eq!(listener.as_array().unwrap().len(), 2);
    assert_eq!(listener[1]["HttpHeaderConfig"]["Values"], json!(["k1", "k2"]));

    let rule = &output["Resources"]["ListOrdersInvalidApiKeyRule3003"]["Properties"];
    assert_eq!(rule["Priority"], json!(6006));
    assert_eq!(
        rule["Conditions"],
        json!([
            { "Field": "path-pattern", "PathPatternConfig": { "Values": ["/orders", "/orders/*"] } },
            { "Field": "http-request-method", "HttpRequestMethodConfig": { "Values": ["GET"] } }
        ])
    );
    assert_eq!(
        rule["Actions"],
        json!([{
            "Type": "fixed-response",
            "FixedResponseConfig": {
                "StatusCode": 401,
                "ContentType": "text/plain",
                "MessageBody": "Unauthorized"
            }
        }])
    );

    // The input template is left as it was.
    let input: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(&project.config.paths.template).unwrap(),
    )
    .unwrap();
    assert_eq!(input, compiled_template());
}

#[test]
fn test_missing_listener_rule_writes_nothing() {
    let mut template = compiled_template();
    template["Resources"]
        .as_object_mut()
        .unwrap()
        .remove("ListOrdersAlbListenerRule3");
    let project = Project::new(SERVICE_YAML, &template);

    let err = apply_files(&project.config).unwrap_err();
    assert!(matches!(
        err,
        RunError::Plugin(PluginError::Transform(TransformError::MissingListenerRule { ref name, .. }))
            if name == "ListOrdersAlbListenerRule3"
    ));

    let on_disk = project.read_output();
    assert_eq!(on_disk, template);
}

#[test]
fn test_wrong_provider_aborts() {
    let service = SERVICE_YAML.replace("name: aws", "name: google");
    let project = Project::new(&service, &compiled_template());

    let err = apply_files(&project.config).unwrap_err();
    assert!(matches!(
        err,
        RunError::Plugin(PluginError::ProviderMismatch { .. })
    ));
    assert!(plan_files(&project.config).is_err());
}

#[test]
fn test_plan_does_not_write() {
    let project = Project::new(SERVICE_YAML, &compiled_template()).with_output("out.json");

    let specs = plan_files(&project.config).unwrap();
    let names: Vec<_> = specs.iter().map(|s| s.invalid_key_rule_name()).collect();
    assert_eq!(
        names,
        vec!["GetUserInvalidApiKeyRule3001", "ListOrdersInvalidApiKeyRule3003"]
    );
    assert!(!project.output_path().exists());
}

#[test]
fn test_service_without_alb_api_keys() {
    let service = r#"
provider:
  name: aws
functions:
  ping:
    handler: ping.handler
    events:
      - http: { path: /ping }
"#;
    let project = Project::new(service, &compiled_template());

    let report = apply_files(&project.config).unwrap();
    assert!(report.is_empty());
    assert_eq!(project.read_output(), compiled_template());
}
