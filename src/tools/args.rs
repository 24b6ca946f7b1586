//! Narrow coercion of the loosely typed argument map each tool receives.

use crate::error::{PachcaError, Result};
use serde_json::{Map, Value};

pub type ToolArgs = Map<String, Value>;

fn present<'a>(args: &'a ToolArgs, key: &str) -> Option<&'a Value> {
    match args.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn as_id(key: &str, value: &Value) -> Result<u64> {
    value.as_u64().ok_or_else(|| {
        PachcaError::invalid_argument(format!("'{}' must be a non-negative integer", key))
    })
}

pub fn required_u64(args: &ToolArgs, key: &str) -> Result<u64> {
    let value = present(args, key).ok_or_else(|| {
        PachcaError::invalid_argument(format!("Missing required argument: {}", key))
    })?;
    as_id(key, value)
}

pub fn optional_u64(args: &ToolArgs, key: &str) -> Result<Option<u64>> {
    present(args, key).map(|value| as_id(key, value)).transpose()
}

pub fn required_str(args: &ToolArgs, key: &str) -> Result<String> {
    match present(args, key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | None => Err(PachcaError::invalid_argument(format!(
            "Missing required argument: {}",
            key
        ))),
        Some(_) => Err(PachcaError::invalid_argument(format!(
            "'{}' must be a string",
            key
        ))),
    }
}

/// An empty string counts as not supplied.
pub fn optional_str(args: &ToolArgs, key: &str) -> Result<Option<String>> {
    match present(args, key) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PachcaError::invalid_argument(format!(
            "'{}' must be a string",
            key
        ))),
    }
}

pub fn optional_bool(args: &ToolArgs, key: &str) -> Result<Option<bool>> {
    match present(args, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(PachcaError::invalid_argument(format!(
            "'{}' must be a boolean",
            key
        ))),
    }
}

pub fn optional_enum(args: &ToolArgs, key: &str, allowed: &[&str]) -> Result<Option<String>> {
    match optional_str(args, key)? {
        Some(value) if allowed.contains(&value.as_str()) => Ok(Some(value)),
        Some(value) => Err(PachcaError::invalid_argument(format!(
            "'{}' must be one of {}, got '{}'",
            key,
            allowed.join(", "),
            value
        ))),
        None => Ok(None),
    }
}

/// A list of ids that must be present, an array, and non-empty.
pub fn required_id_list(args: &ToolArgs, key: &str) -> Result<Vec<u64>> {
    match present(args, key) {
        None => Err(PachcaError::invalid_argument(format!(
            "Missing required argument: {}",
            key
        ))),
        Some(Value::Array(items)) if items.is_empty() => Err(PachcaError::invalid_argument(
            format!("'{}' must contain at least one id", key),
        )),
        Some(Value::Array(items)) => items.iter().map(|item| as_id(key, item)).collect(),
        Some(_) => Err(PachcaError::invalid_argument(format!(
            "'{}' must be an array of ids",
            key
        ))),
    }
}

/// Like [`required_id_list`] but absent is fine; an empty array is treated as absent.
pub fn optional_id_list(args: &ToolArgs, key: &str) -> Result<Vec<u64>> {
    match present(args, key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(|item| as_id(key, item)).collect(),
        Some(_) => Err(PachcaError::invalid_argument(format!(
            "'{}' must be an array of ids",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().unwrap()
    }

    fn message(err: PachcaError) -> String {
        match err {
            PachcaError::InvalidArgument(msg) => msg,
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn required_id_reports_missing_and_wrong_type() {
        let a = args(json!({"id": "seven"}));
        assert!(message(required_u64(&a, "id").unwrap_err()).contains("'id'"));
        let a = args(json!({}));
        assert_eq!(
            message(required_u64(&a, "id").unwrap_err()),
            "Missing required argument: id"
        );
        let a = args(json!({"id": 7}));
        assert_eq!(required_u64(&a, "id").unwrap(), 7);
    }

    #[test]
    fn null_counts_as_absent() {
        let a = args(json!({"cursor": null, "limit": null}));
        assert_eq!(optional_str(&a, "cursor").unwrap(), None);
        assert_eq!(optional_u64(&a, "limit").unwrap(), None);
    }

    #[test]
    fn blank_required_string_is_missing() {
        let a = args(json!({"query": "   "}));
        assert!(message(required_str(&a, "query").unwrap_err()).contains("query"));
    }

    #[test]
    fn enum_rejects_unknown_values() {
        let a = args(json!({"direction": "sideways"}));
        let msg = message(optional_enum(&a, "direction", &["before", "after"]).unwrap_err());
        assert!(msg.contains("sideways"));
        assert!(msg.contains("before, after"));
    }

    #[test]
    fn required_list_rejects_missing_scalar_and_empty() {
        for value in [json!({}), json!({"user_ids": 5}), json!({"user_ids": []})] {
            let msg = message(required_id_list(&args(value), "user_ids").unwrap_err());
            assert!(msg.contains("user_ids"), "message should name the argument: {}", msg);
        }
        let a = args(json!({"user_ids": [1, 2]}));
        assert_eq!(required_id_list(&a, "user_ids").unwrap(), vec![1, 2]);
    }

    #[test]
    fn optional_list_allows_absent_and_empty() {
        assert!(optional_id_list(&args(json!({})), "chat_ids").unwrap().is_empty());
        assert!(optional_id_list(&args(json!({"chat_ids": []})), "chat_ids")
            .unwrap()
            .is_empty());
        assert!(optional_id_list(&args(json!({"chat_ids": "1"})), "chat_ids").is_err());
    }
}
