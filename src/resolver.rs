//! Resolution of nested association keys to the schemas that clean them.

use std::collections::HashMap;

use crate::{
    error::Error,
    handler::{Association, HandlerKind, NESTED_ATTRIBUTES_SUFFIX},
    schema::Schema,
};

/// Lookup of schemas by normalized entity name.
///
/// The engine only ever reads from a directory, so any store that can hand out
/// `&Schema` by name can back it.
pub trait SchemaDirectory {
    /// Returns the schema registered under `name`.
    fn resolve(&self, name: &str) -> Option<&Schema>;
}

/// Derives the schema name for an association handler.
///
/// With an alias the alias is camelized. Otherwise the nested-attributes
/// suffix (`s_attributes`, then `_attributes`) is stripped from the key and
/// the rest camelized.
///
/// ```
/// use strong_arm::sub_schema_name;
///
/// assert_eq!(sub_schema_name("posts_attributes", None), "Post");
/// assert_eq!(sub_schema_name("tag_group", None), "TagGroup");
/// assert_eq!(sub_schema_name("writer_attributes", Some("author")), "Author");
/// ```
pub fn sub_schema_name(key: &str, model_alias: Option<&str>) -> String {
    if let Some(alias) = model_alias {
        return camelize(alias);
    }

    let plural_suffix = format!("s{}", NESTED_ATTRIBUTES_SUFFIX);
    let base = key
        .strip_suffix(plural_suffix.as_str())
        .or_else(|| key.strip_suffix(NESTED_ATTRIBUTES_SUFFIX))
        .unwrap_or(key);

    camelize(base)
}

/// Converts `snake_case` to `PascalCase`. Already-camelized input is kept.
pub(crate) fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Derives the schema name for `association` from its declared name.
///
/// The alias wins when set. A declared name that already carries the
/// nested-attributes suffix (an unformatted key such as `posts_attributes`)
/// goes through [`sub_schema_name`]. Otherwise the name is camelized as
/// declared, singularized first when the association is repeated.
///
/// ```
/// use strong_arm::{target_schema_name, Handler, HandlerKind, NestedOptions};
///
/// let handler = Handler::association("address", false, NestedOptions::default());
/// if let HandlerKind::Association(association) = handler.kind() {
///     assert_eq!(handler.key(), "address_attributes");
///     assert_eq!(target_schema_name(association), "Address");
/// }
/// ```
pub fn target_schema_name(association: &Association) -> String {
    let name = association.name.as_str();
    if let Some(alias) = association.model_alias.as_deref() {
        return camelize(alias);
    }
    if name.ends_with(NESTED_ATTRIBUTES_SUFFIX) {
        return sub_schema_name(name, None);
    }
    if association.has_many {
        return camelize(&singularize(name));
    }
    camelize(name)
}

/// Singularizes the last word of a snake_case name for the common English
/// plural endings (`entries`, `addresses`, `boxes`, `posts`).
pub(crate) fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for ending in ["sses", "xes", "ches", "shes"] {
        if name.ends_with(ending) {
            return name[..name.len() - 2].to_string();
        }
    }
    if name.ends_with("ss") || name.ends_with("us") {
        return name.to_string();
    }
    name.strip_suffix('s').unwrap_or(name).to_string()
}

/// Finds the schema that cleans values for `association`.
///
/// # Errors
///
/// Returns [`Error::SchemaNotFound`] if the directory has no matching schema.
pub fn resolve_association<'d, D>(
    directory: &'d D,
    association: &Association,
) -> Result<&'d Schema, Error>
where
    D: SchemaDirectory + ?Sized,
{
    let name = target_schema_name(association);
    directory.resolve(&name).ok_or(Error::SchemaNotFound { name })
}

/// In-memory [`SchemaDirectory`] keyed by entity name.
///
/// Schemas are registered during start-up and only read afterwards.
///
/// # Examples
///
/// ```
/// use strong_arm::{Schema, SchemaDirectory, SchemaRegistry};
///
/// let mut registry = SchemaRegistry::new();
/// registry.register(Schema::builder("Comment").permit("text")?.build());
/// registry.register(Schema::builder("Post").many_nested("comments").build());
///
/// registry.check_associations()?;
/// assert!(registry.resolve("Comment").is_some());
/// # Ok::<(), strong_arm::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under its name, returning any schema it replaced.
    pub fn register(&mut self, schema: Schema) -> Option<Schema> {
        let replaced = self.schemas.insert(schema.name().to_string(), schema);
        if let Some(old) = &replaced {
            tracing::warn!(schema = %old.label(), "schema registered twice, replacing");
        }
        replaced
    }

    /// Adds `schema` and returns the registry, for chained set-up.
    pub fn with(mut self, schema: Schema) -> Self {
        self.register(schema);
        self
    }

    /// Returns the schema registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotFound`] if nothing is registered under `name`.
    pub fn resolve_schema(&self, name: &str) -> Result<&Schema, Error> {
        self.schemas.get(name).ok_or_else(|| Error::SchemaNotFound {
            name: name.to_string(),
        })
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Resolves every association target of every registered schema.
    ///
    /// Call this once all schemas are registered to surface wiring mistakes
    /// before the first request instead of during it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotFound`] for the first target that is missing.
    /// Schemas are checked in name order so the reported error is stable.
    pub fn check_associations(&self) -> Result<(), Error> {
        let mut names: Vec<&String> = self.schemas.keys().collect();
        names.sort();

        for name in names {
            let schema = &self.schemas[name];
            for handler in schema.handlers() {
                if let HandlerKind::Association(association) = handler.kind() {
                    resolve_association(self, association)?;
                }
            }
        }
        Ok(())
    }
}

impl SchemaDirectory for SchemaRegistry {
    fn resolve(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }
}

impl SchemaDirectory for HashMap<String, Schema> {
    fn resolve(&self, name: &str) -> Option<&Schema> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::handler::NestedOptions;

    #[test]
    fn strips_plural_nested_suffix() {
        assert_eq!(sub_schema_name("posts_attributes", None), "Post");
        assert_eq!(sub_schema_name("comments_attributes", None), "Comment");
    }

    #[test]
    fn strips_singular_nested_suffix() {
        assert_eq!(sub_schema_name("profile_attributes", None), "Profile");
    }

    #[test]
    fn unformatted_keys_are_camelized() {
        assert_eq!(sub_schema_name("tag", None), "Tag");
        assert_eq!(sub_schema_name("tag_category", None), "TagCategory");
    }

    #[test]
    fn suffix_is_only_stripped_at_the_end() {
        assert_eq!(
            sub_schema_name("posts_attributes_archive", None),
            "PostsAttributesArchive"
        );
    }

    #[test]
    fn alias_wins_over_key() {
        assert_eq!(
            sub_schema_name("posts_attributes", Some("blog_entry")),
            "BlogEntry"
        );
        assert_eq!(sub_schema_name("tag", Some("Label")), "Label");
    }

    fn association(name: &str, has_many: bool, alias: Option<&str>) -> Association {
        Association {
            name: name.to_string(),
            has_many,
            model_alias: alias.map(str::to_string),
        }
    }

    #[test]
    fn singular_names_ending_in_s_are_kept() {
        assert_eq!(target_schema_name(&association("address", false, None)), "Address");
        assert_eq!(target_schema_name(&association("status", false, None)), "Status");
    }

    #[test]
    fn repeated_names_are_singularized() {
        assert_eq!(target_schema_name(&association("posts", true, None)), "Post");
        assert_eq!(target_schema_name(&association("addresses", true, None)), "Address");
        assert_eq!(target_schema_name(&association("entries", true, None)), "Entry");
        assert_eq!(target_schema_name(&association("line_items", true, None)), "LineItem");
    }

    #[test]
    fn unformatted_suffixed_names_are_stripped() {
        assert_eq!(
            target_schema_name(&association("posts_attributes", true, None)),
            "Post"
        );
        assert_eq!(
            target_schema_name(&association("profile_attributes", false, None)),
            "Profile"
        );
    }

    #[test]
    fn association_alias_wins() {
        assert_eq!(
            target_schema_name(&association("writer", false, Some("blog_author"))),
            "BlogAuthor"
        );
    }

    #[test]
    fn singularize_edge_cases() {
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("tag"), "tag");
    }

    #[test]
    fn singular_association_ending_in_s_resolves() {
        let registry = SchemaRegistry::new()
            .with(Schema::builder("User").one_nested("address").build())
            .with(Schema::builder("Address").permit("street").unwrap().build());

        assert!(registry.check_associations().is_ok());
    }

    #[test]
    fn camelize_handles_edge_cases() {
        assert_eq!(camelize("user"), "User");
        assert_eq!(camelize("UserProfile"), "UserProfile");
        assert_eq!(camelize("__double__under"), "DoubleUnder");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn registry_resolves_by_name() {
        let registry = SchemaRegistry::new().with(Schema::builder("Post").build());

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("Post").is_some());
        assert!(registry.resolve("PostSchema").is_none());
    }

    #[test]
    fn register_returns_replaced_schema() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.register(Schema::builder("Tag").build()).is_none());

        let replaced = registry.register(Schema::builder("Tag").permit("id").unwrap().build());
        assert!(replaced.is_some());
        assert!(registry.resolve("Tag").unwrap().handler("id").is_some());
    }

    #[test]
    fn missing_target_is_a_configuration_error() {
        let registry = SchemaRegistry::new().with(
            Schema::builder("User")
                .one_nested_with("tag", NestedOptions::unformatted())
                .build(),
        );

        let err = registry.check_associations().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationMissing);
        assert_eq!(
            err,
            Error::SchemaNotFound {
                name: "Tag".to_string()
            }
        );
    }

    #[test]
    fn alias_targets_are_checked() {
        let registry = SchemaRegistry::new()
            .with(
                Schema::builder("Post")
                    .one_nested_with("writer", NestedOptions::default().with_alias("author"))
                    .build(),
            )
            .with(Schema::builder("Author").build());

        assert!(registry.check_associations().is_ok());
    }

    #[test]
    fn hash_map_is_a_directory() {
        let mut map = HashMap::new();
        map.insert("Post".to_string(), Schema::builder("Post").build());

        let association = Association {
            name: "posts".to_string(),
            has_many: true,
            model_alias: None,
        };
        let schema = resolve_association(&map, &association).unwrap();
        assert_eq!(schema.name(), "Post");
    }
}
