//! Conversion boundary for host parameter types.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Converts a host framework's parameter object into a plain nested map.
///
/// This trait defines the boundary between web framework types and the
/// engine. It is called once per request, before any validation, and must not
/// filter anything: whitelisting is the schema's job.
///
/// # Examples
///
/// ```
/// use serde_json::{Map, Value};
/// use strong_arm::params::ToPlainMap;
///
/// // Example framework-specific parameter bag
/// struct MyFrameworkParams {
///     fields: Vec<(String, String)>,
/// }
///
/// impl ToPlainMap for MyFrameworkParams {
///     fn to_plain_map(&self) -> Map<String, Value> {
///         self.fields
///             .iter()
///             .map(|(k, v)| (k.clone(), Value::String(v.clone())))
///             .collect()
///     }
/// }
///
/// let params = MyFrameworkParams {
///     fields: vec![("name".to_string(), "Nate".to_string())],
/// };
/// assert_eq!(params.to_plain_map()["name"], "Nate");
/// ```
pub trait ToPlainMap {
    /// Returns the parameters as a nested map.
    fn to_plain_map(&self) -> Map<String, Value>;
}

impl ToPlainMap for Map<String, Value> {
    fn to_plain_map(&self) -> Map<String, Value> {
        self.clone()
    }
}

impl ToPlainMap for HashMap<String, String> {
    fn to_plain_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}
