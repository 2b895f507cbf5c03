//! The recursive extraction engine.
//!
//! [`Flexer::flex`] walks a schema's handlers against a raw input map and
//! builds the cleaned output:
//!
//! 1. Unwrap the data key if it holds a non-empty map or sequence
//! 2. Reject absent input and input that is not a map
//! 3. Reject keys the schema neither declares nor ignores
//! 4. For each handler in registration order, apply the presence policy and
//!    either copy the scalar or recurse into the association's schema
//!
//! Any failure ends the whole call. Nested failures propagate unchanged, with
//! the key path at which they occurred.

use serde_json::{Map, Value};

use crate::{
    config::FlexConfig,
    error::Error,
    handler::{Association, Handler, HandlerKind},
    logging::FlexLog,
    params::ToPlainMap,
    presence::{is_absent, is_unwrappable},
    reconcile::unhandled_keys,
    resolver::{resolve_association, SchemaDirectory},
    schema::Schema,
};

/// Runs schemas against input, resolving nested schemas through a directory.
///
/// A `Flexer` only borrows its directory and never mutates anything, so one
/// instance can serve any number of calls, from any number of threads when
/// the directory is `Sync`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_arm::{Flexer, PermitOptions, Schema, SchemaRegistry};
///
/// let registry = SchemaRegistry::new()
///     .with(
///         Schema::builder("User")
///             .permit("name")?
///             .permit_with("email", PermitOptions::required())?
///             .many_nested("posts")
///             .build(),
///     )
///     .with(Schema::builder("Post").permit("title")?.build());
///
/// let flexer = Flexer::new(&registry);
/// let cleaned = flexer.flex_named(
///     "User",
///     &json!({
///         "name": "Nate",
///         "email": "nate@example.com",
///         "posts_attributes": [{"title": "Hello"}],
///     }),
/// )?;
///
/// assert_eq!(cleaned["posts_attributes"], json!([{"title": "Hello"}]));
/// # Ok::<(), strong_arm::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Flexer<'d, D: SchemaDirectory + ?Sized> {
    directory: &'d D,
    config: FlexConfig,
}

impl<'d, D: SchemaDirectory + ?Sized> Flexer<'d, D> {
    /// Creates a flexer with the default (strict) configuration.
    pub fn new(directory: &'d D) -> Self {
        Self::with_config(directory, FlexConfig::default())
    }

    /// Creates a flexer with an explicit configuration.
    pub fn with_config(directory: &'d D, config: FlexConfig) -> Self {
        Self { directory, config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &FlexConfig {
        &self.config
    }

    /// Cleans `input` against `schema`.
    ///
    /// # Errors
    ///
    /// - [`Error::ValuesMissing`] if the (unwrapped) input is absent
    /// - [`Error::MalformedInput`] if the (unwrapped) input is not a map
    /// - [`Error::UnhandledKeys`] if the input has undeclared keys (strict only)
    /// - [`Error::RequiredValueMissing`] if a required value is absent (strict only)
    /// - [`Error::SchemaNotFound`] if a nested schema cannot be resolved
    /// - [`Error::DepthExceeded`] if nesting passes the configured maximum
    pub fn flex(&self, schema: &Schema, input: &Value) -> Result<Map<String, Value>, Error> {
        self.flex_at(schema, input, "", 0)
    }

    /// Cleans `input` against the schema registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotFound`] if no such schema is registered, and
    /// otherwise fails like [`flex`](Self::flex).
    pub fn flex_named(&self, name: &str, input: &Value) -> Result<Map<String, Value>, Error> {
        let schema = self
            .directory
            .resolve(name)
            .ok_or_else(|| Error::SchemaNotFound {
                name: name.to_string(),
            })?;
        self.flex(schema, input)
    }

    /// Converts host parameters to a plain map and cleans them.
    ///
    /// # Errors
    ///
    /// Fails like [`flex`](Self::flex).
    pub fn flex_params<P>(&self, schema: &Schema, params: &P) -> Result<Map<String, Value>, Error>
    where
        P: ToPlainMap + ?Sized,
    {
        let input = Value::Object(params.to_plain_map());
        self.flex(schema, &input)
    }

    fn flex_at(
        &self,
        schema: &Schema,
        input: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Map<String, Value>, Error> {
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.config.max_depth,
                path: path.to_string(),
            });
        }

        let label = schema.label();
        let span = tracing::debug_span!("flex", schema = %label, path = %path, depth);
        let _enter = span.enter();
        let log = FlexLog::new(&label, path);

        let input = self.expose_data(input);
        if is_absent(Some(input), false) {
            return Err(Error::ValuesMissing {
                path: path.to_string(),
            });
        }
        let Value::Object(map) = input else {
            return Err(Error::MalformedInput {
                path: path.to_string(),
            });
        };

        let unhandled = unhandled_keys(schema, map);
        if !unhandled.is_empty() {
            if !self.config.is_lenient() {
                return Err(Error::UnhandledKeys {
                    schema: label.clone(),
                    keys: unhandled.iter().map(|k| k.to_string()).collect(),
                    path: path.to_string(),
                });
            }
            log.warn(format_args!("dropping unhandled keys: {}", unhandled.join(", ")));
        }

        let mut output = Map::new();
        for handler in schema.handlers() {
            if let Some(value) = self.extract(handler, map, path, depth, &log)? {
                output.insert(handler.key().to_string(), value);
            }
        }

        log.debug(format_args!("kept {} of {} keys", output.len(), map.len()));
        Ok(output)
    }

    /// Returns the wrapped payload when the data key holds a non-empty map or
    /// sequence. Scalars under the data key leave the input untouched.
    fn expose_data<'v>(&self, input: &'v Value) -> &'v Value {
        match input {
            Value::Object(map) => match map.get(&self.config.data_key) {
                Some(data) if is_unwrappable(data) => data,
                _ => input,
            },
            _ => input,
        }
    }

    fn extract(
        &self,
        handler: &Handler,
        input: &Map<String, Value>,
        path: &str,
        depth: usize,
        log: &FlexLog<'_>,
    ) -> Result<Option<Value>, Error> {
        let key = handler.key();
        let value = input.get(key);
        let absent = is_absent(value, handler.allows_nil());

        if handler.is_required() && absent {
            if self.config.is_lenient() {
                log.warn(format_args!("no value for required input: {}", key));
                return Ok(None);
            }
            return Err(Error::RequiredValueMissing {
                key: key.to_string(),
                path: child_path(path, key),
            });
        }

        // A missing key is never output, even when nil is allowed.
        let Some(value) = value.filter(|_| !absent) else {
            log.trace(format_args!("skipping absent {}", key));
            return Ok(None);
        };

        match handler.kind() {
            HandlerKind::Scalar(_) => Ok(Some(value.clone())),
            HandlerKind::Association(association) => {
                self.flex_association(key, association, value, path, depth)
            }
        }
    }

    fn flex_association(
        &self,
        key: &str,
        association: &Association,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Option<Value>, Error> {
        let target = resolve_association(self.directory, association)?;
        let key_path = child_path(path, key);

        let mut cleaned = Vec::new();
        match value {
            Value::Array(_) => {
                let mut items = Vec::new();
                flatten_into(value, &mut items);
                for (index, item) in items.into_iter().enumerate() {
                    let item_path = format!("{}[{}]", key_path, index);
                    cleaned.push(self.flex_at(target, item, &item_path, depth + 1)?);
                }
            }
            single => cleaned.push(self.flex_at(target, single, &key_path, depth + 1)?),
        }

        if association.has_many {
            Ok(Some(Value::Array(
                cleaned.into_iter().map(Value::Object).collect(),
            )))
        } else {
            Ok(cleaned.pop().map(Value::Object))
        }
    }
}

impl Schema {
    /// Cleans `input` against this schema with the default configuration,
    /// resolving nested schemas through `directory`.
    ///
    /// # Errors
    ///
    /// Fails like [`Flexer::flex`].
    pub fn flex<D>(&self, directory: &D, input: &Value) -> Result<Map<String, Value>, Error>
    where
        D: SchemaDirectory + ?Sized,
    {
        Flexer::new(directory).flex(self, input)
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

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
