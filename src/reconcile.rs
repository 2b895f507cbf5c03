//! Key reconciliation between input and a schema's declarations.

use serde_json::{Map, Value};

use crate::schema::Schema;

/// Returns the input keys that `schema` neither declares nor ignores.
///
/// Keys are returned in input order.
///
/// ```
/// use serde_json::json;
/// use strong_arm::{unhandled_keys, Schema};
///
/// let schema = Schema::builder("User")
///     .ignore(["created_at"])
///     .permit("id")?
///     .build();
///
/// let input = json!({"id": 1, "created_at": "today", "income": 150000});
/// let keys = unhandled_keys(&schema, input.as_object().unwrap());
///
/// assert_eq!(keys, vec!["income"]);
/// # Ok::<(), strong_arm::Error>(())
/// ```
pub fn unhandled_keys<'a>(schema: &Schema, input: &'a Map<String, Value>) -> Vec<&'a str> {
    input
        .keys()
        .map(String::as_str)
        .filter(|key| !schema.accepts(key))
        .collect()
}
