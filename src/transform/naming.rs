//! Logical resource names derived from function names and priorities.

/// Offset added to an event's priority for its invalid-key rule.
pub const INVALID_KEY_PRIORITY_OFFSET: u64 = 3000;

/// Uppercase the first character, leaving the rest as is.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the listener rule compiled for a function's ALB event,
/// e.g. `GetUserAlbListenerRule1`.
pub fn listener_rule_name(function_name: &str, priority: u32) -> String {
    format!("{}AlbListenerRule{}", capitalize_first(function_name), priority)
}

/// Name of the invalid-key rule, e.g. `GetUserInvalidApiKeyRule3001`.
pub fn invalid_key_rule_name(function_name: &str, rule_priority: u64) -> String {
    format!("{}InvalidApiKeyRule{}", capitalize_first(function_name), rule_priority)
}
