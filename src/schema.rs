//! Schema declaration and the builder that produces it.

use crate::{
    error::Error,
    handler::{AttributeList, Handler, NestedOptions, PermitOptions},
};

/// The declared shape of one entity.
///
/// A `Schema` is an ordered set of [`Handler`]s plus an ignore list. It can
/// only be created through [`SchemaBuilder`] and is immutable afterwards.
///
/// # Examples
///
/// ```
/// use strong_arm::{NestedOptions, PermitOptions, Schema};
///
/// let schema = Schema::builder("User")
///     .ignore(["created_at", "updated_at"])
///     .permit("id")?
///     .permit_with("email", PermitOptions::required())?
///     .many_nested("posts")
///     .one_nested_with("tag", NestedOptions::unformatted())
///     .build();
///
/// assert_eq!(schema.label(), "UserSchema");
/// assert_eq!(
///     schema.handler_keys().collect::<Vec<_>>(),
///     vec!["id", "email", "posts_attributes", "tag"]
/// );
/// # Ok::<(), strong_arm::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    handlers: Vec<Handler>,
    ignored: Vec<String>,
}

impl Schema {
    /// Starts declaring a schema for the entity `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Returns the entity name the schema is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the label used in error messages, e.g. `UserSchema`.
    pub fn label(&self) -> String {
        format!("{}Schema", self.name)
    }

    /// Returns the handlers in registration order.
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Returns the handler for `key`, if one is declared.
    pub fn handler(&self, key: &str) -> Option<&Handler> {
        self.handlers.iter().find(|h| h.key() == key)
    }

    /// Returns the declared handler keys in registration order.
    pub fn handler_keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(Handler::key)
    }

    /// Returns the ignored keys.
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// Returns true if `key` is declared or ignored.
    pub fn accepts(&self, key: &str) -> bool {
        self.handler(key).is_some() || self.ignored.iter().any(|k| k == key)
    }
}

/// Builder for [`Schema`].
///
/// Declarations are recorded in call order. Declaring the same key twice
/// replaces the earlier handler but keeps its position.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    handlers: Vec<Handler>,
    ignored: Vec<String>,
}

impl SchemaBuilder {
    /// Creates an empty builder for the entity `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
            ignored: Vec::new(),
        }
    }

    /// Declares keys that are accepted in input but never copied to output.
    ///
    /// Each call replaces the previous ignore list.
    pub fn ignore<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.ignored.clear();
        for key in keys {
            let key = key.into();
            if !self.ignored.contains(&key) {
                self.ignored.push(key);
            }
        }
        self
    }

    /// Permits a plain value with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MultipleAttributes`] unless exactly one attribute
    /// name is passed.
    pub fn permit(self, attribute: impl AttributeList) -> Result<Self, Error> {
        self.permit_with(attribute, PermitOptions::default())
    }

    /// Permits a plain value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MultipleAttributes`] unless exactly one attribute
    /// name is passed.
    ///
    /// ```
    /// use strong_arm::{ErrorKind, Schema};
    ///
    /// let err = Schema::builder("Date").permit(["month", "year"]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::MultipleAttributes);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "DateSchema received multiple attributes for a single input."
    /// );
    /// ```
    pub fn permit_with(
        self,
        attribute: impl AttributeList,
        options: PermitOptions,
    ) -> Result<Self, Error> {
        let mut attributes = attribute.into_attributes();
        if attributes.len() != 1 {
            return Err(Error::MultipleAttributes {
                schema: format!("{}Schema", self.name),
                attributes,
            });
        }

        let key = attributes.remove(0);
        Ok(self.set_handler(Handler::scalar(key, options)))
    }

    /// Declares a singular nested entity stored under `<name>_attributes`.
    pub fn one_nested(self, association: impl Into<String>) -> Self {
        self.one_nested_with(association, NestedOptions::default())
    }

    /// Declares a singular nested entity.
    pub fn one_nested_with(self, association: impl Into<String>, options: NestedOptions) -> Self {
        self.set_handler(Handler::association(association, false, options))
    }

    /// Declares a repeated nested entity stored under `<name>_attributes`.
    pub fn many_nested(self, association: impl Into<String>) -> Self {
        self.many_nested_with(association, NestedOptions::default())
    }

    /// Declares a repeated nested entity.
    pub fn many_nested_with(self, association: impl Into<String>, options: NestedOptions) -> Self {
        self.set_handler(Handler::association(association, true, options))
    }

    /// Finishes the declaration.
    pub fn build(self) -> Schema {
        tracing::debug!(
            schema = %self.name,
            handlers = self.handlers.len(),
            ignored = self.ignored.len(),
            "schema declared"
        );

        Schema {
            name: self.name,
            handlers: self.handlers,
            ignored: self.ignored,
        }
    }

    fn set_handler(mut self, handler: Handler) -> Self {
        match self.handlers.iter_mut().find(|h| h.key() == handler.key()) {
            Some(existing) => *existing = handler,
            None => self.handlers.push(handler),
        }
        self
    }
}
