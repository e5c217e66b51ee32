use mcp_protocol_sdk::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

use crate::adapter::AdapterError;

pub fn required_str_arg(
    arguments: &HashMap<String, Value>,
    key: &'static str,
) -> Result<String, AdapterError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Err(AdapterError::MissingArgument(key)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(AdapterError::InvalidArgument {
            name: key,
            reason: "must not be empty".to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(AdapterError::InvalidArgument {
            name: key,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

pub fn optional_str_arg(
    arguments: &HashMap<String, Value>,
    key: &'static str,
) -> Result<Option<String>, AdapterError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AdapterError::InvalidArgument {
            name: key,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

/// Integers may also arrive as numeric strings from loosely typed clients.
pub fn optional_int_arg(
    arguments: &HashMap<String, Value>,
    key: &'static str,
) -> Result<Option<i64>, AdapterError> {
    let invalid = |reason: String| AdapterError::InvalidArgument { name: key, reason };
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_float_to_i64))
            .map(Some)
            .ok_or_else(|| invalid(format!("expected an integer, got {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| invalid(format!("expected an integer, got '{s}': {e}"))),
        Some(other) => Err(invalid(format!("expected an integer, got {other}"))),
    }
}

/// `5.0` is accepted as `5`; fractional or out-of-range values are not.
fn whole_float_to_i64(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Wrap an upstream JSON body as a tool result: compact text for clients
/// that only read content, plus structured content when the body is an object.
pub fn json_tool_result(value: Value) -> ToolResult {
    let structured = value.is_object().then(|| value.clone());
    ToolResult {
        content: vec![Content::Text {
            text: value.to_string(),
            annotations: None,
            meta: None,
        }],
        is_error: Some(false),
        structured_content: structured,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(v: Value) -> HashMap<String, Value> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn required_str_reports_missing_and_blank() {
        let a = args(json!({ "topic": "  ", "n": 3 }));
        assert!(matches!(required_str_arg(&a, "url"), Err(AdapterError::MissingArgument("url"))));
        assert!(matches!(
            required_str_arg(&a, "topic"),
            Err(AdapterError::InvalidArgument { name: "topic", .. })
        ));
        assert!(required_str_arg(&a, "n").is_err());
    }

    #[test]
    fn optional_int_accepts_numbers_and_numeric_strings() {
        let a = args(json!({ "a": 5, "b": "7", "c": null, "d": 1.5, "e": "x" }));
        assert_eq!(optional_int_arg(&a, "a").unwrap(), Some(5));
        assert_eq!(optional_int_arg(&a, "b").unwrap(), Some(7));
        assert_eq!(optional_int_arg(&a, "c").unwrap(), None);
        assert_eq!(optional_int_arg(&a, "missing").unwrap(), None);
        assert!(optional_int_arg(&a, "d").is_err());
        assert!(optional_int_arg(&a, "e").is_err());
    }

    #[test]
    fn optional_int_accepts_whole_floats() {
        let a = args(json!({ "whole": 5.0, "negative": -2.0, "huge": 1e300 }));
        assert_eq!(optional_int_arg(&a, "whole").unwrap(), Some(5));
        assert_eq!(optional_int_arg(&a, "negative").unwrap(), Some(-2));
        assert!(optional_int_arg(&a, "huge").is_err());
    }

    #[test]
    fn json_result_keeps_body_verbatim() {
        let body = json!({ "articles": [] });
        let result = json_tool_result(body.clone());
        assert_eq!(result.structured_content, Some(body));
        match &result.content[0] {
            Content::Text { text, .. } => assert_eq!(text, r#"{"articles":[]}"#),
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn non_object_bodies_skip_structured_content() {
        let result = json_tool_result(json!([1, 2]));
        assert!(result.structured_content.is_none());
    }
}
