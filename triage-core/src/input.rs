//! Parsing of the raw task input buffer.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Please paste an array of tasks in JSON format.")]
    Empty,

    #[error("Invalid JSON. Make sure your input is valid JSON.")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Top-level JSON should be an array of task objects.")]
    NotAnArray,
}

/// Parse the input buffer into the task array.
///
/// Items are returned verbatim: no per-record schema check happens here, the
/// server and the card renderer both tolerate malformed records.
pub fn parse_tasks(raw: &str) -> Result<Vec<Value>, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InputError::Empty);
    }

    let parsed: Value = serde_json::from_str(raw).map_err(InputError::InvalidJson)?;
    match parsed {
        Value::Array(items) => Ok(items),
        _ => Err(InputError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_input_is_empty() {
        assert!(matches!(parse_tasks(""), Err(InputError::Empty)));
        assert!(matches!(parse_tasks("  \n\t "), Err(InputError::Empty)));
    }

    #[test]
    fn test_object_is_wrong_shape() {
        let err = parse_tasks("{}").unwrap_err();
        assert!(matches!(err, InputError::NotAnArray));
        assert_eq!(
            err.to_string(),
            "Top-level JSON should be an array of task objects."
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_tasks("[{\"title\": ").unwrap_err();
        assert!(matches!(err, InputError::InvalidJson(_)));
        assert_eq!(err.to_string(), "Invalid JSON. Make sure your input is valid JSON.");
    }

    #[test]
    fn test_array_passes_through_unchanged() {
        let items = parse_tasks(" [1,2,3] ").unwrap();
        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_records_are_not_validated() {
        let items = parse_tasks(r#"[{"nonsense": true}, "x", null]"#).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], json!({"nonsense": true}));
    }
}
