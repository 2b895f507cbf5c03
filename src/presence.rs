//! Presence policy for input values.

use serde_json::Value;

/// Returns true if `value` counts as absent.
///
/// - With `allow_nil` nothing is ever absent.
/// - `null` (or a missing key, passed as `None`) is absent.
/// - A map is absent when it has no entries.
/// - Anything else is wrapped in a sequence and flattened. It is absent when
///   the flattened sequence is empty or holds a single blank element: `null`,
///   an empty map, or a string of only whitespace.
///
/// `false` and `0` are never blank.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_arm::is_absent;
///
/// assert!(is_absent(None, false));
/// assert!(is_absent(Some(&json!(null)), false));
/// assert!(is_absent(Some(&json!({})), false));
/// assert!(is_absent(Some(&json!([[]])), false));
/// assert!(is_absent(Some(&json!("")), false));
///
/// assert!(!is_absent(Some(&json!(false)), false));
/// assert!(!is_absent(Some(&json!(null)), true));
/// ```
pub fn is_absent(value: Option<&Value>, allow_nil: bool) -> bool {
    if allow_nil {
        return false;
    }

    let Some(value) = value else {
        return true;
    };

    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => {
            let mut flat = Vec::new();
            flatten_into(value, &mut flat);
            match flat.as_slice() {
                [] => true,
                [sole] => is_blank(sole),
                _ => false,
            }
        }
    }
}

fn flatten_into<'v>(value: &'v Value, out: &mut Vec<&'v Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        other => out.push(other),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(text) => text.trim().is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) => false,
    }
}

/// Returns true if a wrapped payload under the data key should replace the
/// input: a non-empty map, or a sequence that is not absent.
pub(crate) fn is_unwrappable(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(_) => !is_absent(Some(value), false),
        _ => false,
    }
}
