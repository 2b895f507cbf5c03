//! Bracketed form-field adapter.

use serde_json::{Map, Value};

use super::ToPlainMap;

/// Flat form fields with bracketed names, converted to a nested map on demand.
///
/// - `a[b][c]=v` nests maps
/// - `a[]=v` appends to a sequence
/// - `a[][b]=v` appends maps, starting a new one when the last already has `b`
/// - a map whose keys are all decimal indexes becomes a sequence ordered by
///   index, so `posts_attributes[0][title]` arrives as a sequence of posts
///
/// Later fields for the same scalar path overwrite earlier ones. Names with
/// unbalanced brackets are kept as literal keys. Every value is a string.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_arm::params::{FormParams, ToPlainMap};
///
/// let mut params = FormParams::new();
/// params.add("user[name]", "Nate");
/// params.add("user[tags][]", "rust");
/// params.add("user[tags][]", "serde");
///
/// assert_eq!(
///     serde_json::Value::Object(params.to_plain_map()),
///     json!({"user": {"name": "Nate", "tags": ["rust", "serde"]}})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    fields: Vec<(String, String)>,
}

impl FormParams {
    /// Creates an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. Order matters for `[]` appends and for overwrites.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Returns the raw fields in the order they were added.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns the number of raw fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields were added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = FormParams::new();
        for (name, value) in iter {
            params.add(name, value);
        }
        params
    }
}

impl ToPlainMap for FormParams {
    fn to_plain_map(&self) -> Map<String, Value> {
        let mut root = Map::new();
        for (name, value) in &self.fields {
            let segments = split_name(name);
            insert(&mut root, &segments, Value::String(value.clone()));
        }

        for value in root.values_mut() {
            index_maps_to_sequences(value);
        }
        root
    }
}

/// Splits `a[b][]` into `["a", "b", ""]`.
fn split_name(name: &str) -> Vec<String> {
    let Some(open) = name.find('[') else {
        return vec![name.to_string()];
    };
    if open == 0 || !name.ends_with(']') {
        return vec![name.to_string()];
    }

    let mut segments = vec![name[..open].to_string()];
    let mut rest = &name[open..];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return vec![name.to_string()];
        };
        let Some(close) = inner.find(']') else {
            return vec![name.to_string()];
        };
        let segment = &inner[..close];
        if segment.contains('[') {
            return vec![name.to_string()];
        }
        segments.push(segment.to_string());
        rest = &inner[close + 1..];
    }
    segments
}

fn insert(target: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        target.insert(head.clone(), value);
        return;
    }

    if rest[0].is_empty() {
        let slot = target
            .entry(head.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(items) = slot {
            append(items, &rest[1..], value);
        }
        return;
    }

    let slot = target
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        insert(map, rest, value);
    }
}

fn append(items: &mut Vec<Value>, rest: &[String], value: Value) {
    if rest.is_empty() {
        items.push(value);
        return;
    }

    let starts_new_item = match items.last() {
        Some(Value::Object(last)) => last.contains_key(&rest[0]),
        _ => true,
    };
    if starts_new_item {
        items.push(Value::Object(Map::new()));
    }
    if let Some(Value::Object(last)) = items.last_mut() {
        insert(last, rest, value);
    }
}

fn index_maps_to_sequences(value: &mut Value) {
    let sequence = match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                index_maps_to_sequences(item);
            }
            None
        }
        Value::Object(map) => {
            for child in map.values_mut() {
                index_maps_to_sequences(child);
            }
            if is_index_map(map) {
                let mut indexed: Vec<(u64, Value)> = std::mem::take(map)
                    .into_iter()
                    .map(|(k, v)| (k.parse().unwrap_or(u64::MAX), v))
                    .collect();
                indexed.sort_by_key(|(index, _)| *index);
                Some(indexed.into_iter().map(|(_, v)| v).collect())
            } else {
                None
            }
        }
        _ => None,
    };

    if let Some(items) = sequence {
        *value = Value::Array(items);
    }
}

fn is_index_map(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .keys()
            .all(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()))
}
