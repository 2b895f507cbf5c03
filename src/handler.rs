//! Handler descriptors registered by schema declarations.

/// Suffix appended to association names by the nested-attributes convention.
pub const NESTED_ATTRIBUTES_SUFFIX: &str = "_attributes";

/// Returns the nested-attributes key for an association name.
///
/// ```
/// use strong_arm::nested_attributes_key;
///
/// assert_eq!(nested_attributes_key("posts"), "posts_attributes");
/// ```
pub fn nested_attributes_key(association: &str) -> String {
    format!("{}{}", association, NESTED_ATTRIBUTES_SUFFIX)
}

/// A single declared key and the rule used to extract its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    key: String,
    kind: HandlerKind,
}

impl Handler {
    /// Creates a scalar handler for `key`.
    pub fn scalar(key: impl Into<String>, options: PermitOptions) -> Self {
        Self {
            key: key.into(),
            kind: HandlerKind::Scalar(options),
        }
    }

    /// Creates an association handler for the association `name`.
    ///
    /// The stored key is `name` itself, or `<name>_attributes` when
    /// `options.format_key` is set.
    pub fn association(name: impl Into<String>, has_many: bool, options: NestedOptions) -> Self {
        let name = name.into();
        let key = if options.format_key {
            nested_attributes_key(&name)
        } else {
            name.clone()
        };

        Self {
            key,
            kind: HandlerKind::Association(Association {
                name,
                has_many,
                model_alias: options.model_alias,
            }),
        }
    }

    /// Returns the input key this handler reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns what kind of handler this is.
    pub fn kind(&self) -> &HandlerKind {
        &self.kind
    }

    /// Returns true if the handler fails on an absent value.
    pub fn is_required(&self) -> bool {
        matches!(&self.kind, HandlerKind::Scalar(options) if options.required)
    }

    /// Returns true if the handler treats every value, including `null`, as present.
    pub fn allows_nil(&self) -> bool {
        matches!(&self.kind, HandlerKind::Scalar(options) if options.allow_nil)
    }
}

/// Scalar values pass through unchanged; associations delegate to another schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerKind {
    /// A plain permitted value
    Scalar(PermitOptions),
    /// A nested entity, or sequence of entities, cleaned by another schema
    Association(Association),
}

/// A nested-entity declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// The association name as declared (`posts`), before key formatting
    pub name: String,
    /// Whether the output is a sequence of cleaned items
    pub has_many: bool,
    /// Overrides the schema name derived from `name`
    pub model_alias: Option<String>,
}

/// Options for [`SchemaBuilder::permit_with`](crate::SchemaBuilder::permit_with).
///
/// ```
/// use strong_arm::PermitOptions;
///
/// let options = PermitOptions::required();
/// assert!(options.required);
/// assert!(!options.allow_nil);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermitOptions {
    /// Fail with `RequiredValueMissing` when the value is absent
    pub required: bool,
    /// Treat `null` as a real value and pass it through
    pub allow_nil: bool,
}

impl PermitOptions {
    /// Options for a required value.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Options for a value that may be explicitly `null`.
    pub fn allow_nil() -> Self {
        Self {
            allow_nil: true,
            ..Self::default()
        }
    }
}

/// Options for nested association declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedOptions {
    /// Store the handler under `<name>_attributes` instead of `<name>`
    pub format_key: bool,
    /// Schema name to use instead of the one derived from the key
    pub model_alias: Option<String>,
}

impl Default for NestedOptions {
    fn default() -> Self {
        Self {
            format_key: true,
            model_alias: None,
        }
    }
}

impl NestedOptions {
    /// Options that keep the declared key as-is.
    pub fn unformatted() -> Self {
        Self {
            format_key: false,
            ..Self::default()
        }
    }

    /// Sets the schema alias used to clean nested values.
    pub fn with_alias(mut self, model_alias: impl Into<String>) -> Self {
        self.model_alias = Some(model_alias.into());
        self
    }
}

/// One or more attribute names passed to a `permit` call.
///
/// Implemented for single names and for slices, arrays and vectors of names
/// so that a bundled declaration can be detected and rejected.
pub trait AttributeList {
    /// Returns the attribute names in declaration order.
    fn into_attributes(self) -> Vec<String>;
}

impl AttributeList for &str {
    fn into_attributes(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl AttributeList for String {
    fn into_attributes(self) -> Vec<String> {
        vec![self]
    }
}

impl AttributeList for &[&str] {
    fn into_attributes(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> AttributeList for [&str; N] {
    fn into_attributes(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl AttributeList for Vec<&str> {
    fn into_attributes(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl AttributeList for Vec<String> {
    fn into_attributes(self) -> Vec<String> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_formats_key_by_default() {
        let handler = Handler::association("posts", true, NestedOptions::default());

        assert_eq!(handler.key(), "posts_attributes");
        match handler.kind() {
            HandlerKind::Association(assoc) => {
                assert_eq!(assoc.name, "posts");
                assert!(assoc.has_many);
                assert!(assoc.model_alias.is_none());
            }
            other => panic!("expected association, got {:?}", other),
        }
    }

    #[test]
    fn unformatted_association_keeps_key() {
        let handler = Handler::association("tag", false, NestedOptions::unformatted());
        assert_eq!(handler.key(), "tag");
    }

    #[test]
    fn alias_is_stored() {
        let options = NestedOptions::default().with_alias("author");
        let handler = Handler::association("writer", false, options);

        match handler.kind() {
            HandlerKind::Association(assoc) => {
                assert_eq!(assoc.model_alias.as_deref(), Some("author"));
            }
            other => panic!("expected association, got {:?}", other),
        }
    }

    #[test]
    fn scalar_flags() {
        let required = Handler::scalar("email", PermitOptions::required());
        assert!(required.is_required());
        assert!(!required.allows_nil());

        let nullable = Handler::scalar("nickname", PermitOptions::allow_nil());
        assert!(!nullable.is_required());
        assert!(nullable.allows_nil());
    }

    #[test]
    fn associations_are_never_required() {
        let handler = Handler::association("posts", true, NestedOptions::default());
        assert!(!handler.is_required());
        assert!(!handler.allows_nil());
    }

    #[test]
    fn attribute_lists() {
        assert_eq!("id".into_attributes(), vec!["id"]);
        assert_eq!(["month", "year"].into_attributes(), vec!["month", "year"]);
        assert_eq!(vec!["a"].into_attributes(), vec!["a"]);
        let names: &[&str] = &["x", "y"];
        assert_eq!(names.into_attributes().len(), 2);
    }
}
