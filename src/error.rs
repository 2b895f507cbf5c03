use std::fmt;

/// Errors raised while declaring schemas or flexing input through them.
///
/// Every variant maps onto an [`ErrorKind`]. Declaration and configuration
/// problems ([`ErrorKind::MultipleAttributes`], [`ErrorKind::ConfigurationMissing`])
/// are programmer errors; the remaining kinds describe bad input data.
///
/// Variants that occur during extraction carry the key `path` at which they
/// were detected, e.g. `posts_attributes[1].comments_attributes[0]`. An empty
/// path means the top-level input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A single `permit` declaration bundled more than one attribute name.
    MultipleAttributes {
        /// Label of the schema being declared
        schema: String,
        /// The attribute names that were bundled together
        attributes: Vec<String>,
    },
    /// A nested schema could not be found in the schema directory.
    SchemaNotFound {
        /// The normalized schema name that was looked up
        name: String,
    },
    /// Input nesting went deeper than the configured maximum.
    DepthExceeded {
        /// The configured limit
        max_depth: usize,
        /// Where the limit was hit
        path: String,
    },
    /// The (unwrapped) input was absent or empty.
    ValuesMissing {
        /// Where the empty input was found
        path: String,
    },
    /// The (unwrapped) input was present but not a map of values.
    MalformedInput {
        /// Where the malformed input was found
        path: String,
    },
    /// The input contained keys that are neither declared nor ignored.
    UnhandledKeys {
        /// Label of the schema that rejected the keys
        schema: String,
        /// Offending keys, in input order
        keys: Vec<String>,
        /// Where the map holding the keys was found
        path: String,
    },
    /// A required scalar value was absent.
    RequiredValueMissing {
        /// The innermost key name
        key: String,
        /// Full path to the key
        path: String,
    },
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MultipleAttributes { .. } => ErrorKind::MultipleAttributes,
            Error::SchemaNotFound { .. } | Error::DepthExceeded { .. } => {
                ErrorKind::ConfigurationMissing
            }
            Error::ValuesMissing { .. } | Error::MalformedInput { .. } => ErrorKind::ValuesMissing,
            Error::UnhandledKeys { .. } => ErrorKind::UnhandledKeys,
            Error::RequiredValueMissing { .. } => ErrorKind::RequiredValueMissing,
        }
    }

    /// Returns true if the error was caused by the input data rather than by
    /// the way schemas were declared or wired together.
    pub fn is_data_error(&self) -> bool {
        self.kind().is_data_error()
    }

    /// Returns the key path at which the error was detected, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MultipleAttributes { .. } | Error::SchemaNotFound { .. } => None,
            Error::DepthExceeded { path, .. }
            | Error::ValuesMissing { path }
            | Error::MalformedInput { path }
            | Error::UnhandledKeys { path, .. }
            | Error::RequiredValueMissing { path, .. } => Some(path),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MultipleAttributes { schema, .. } => {
                write!(f, "{} received multiple attributes for a single input.", schema)
            }
            Error::SchemaNotFound { name } => {
                write!(f, "No schema registered for {}.", name)
            }
            Error::DepthExceeded { max_depth, path } => {
                write!(f, "Nesting exceeds maximum depth of {}", max_depth)?;
                write_path(f, path)
            }
            Error::ValuesMissing { path } => {
                write!(f, "No values were passed.")?;
                write_path(f, path)
            }
            Error::MalformedInput { path } => {
                write!(f, "Expected a map of values.")?;
                write_path(f, path)
            }
            Error::UnhandledKeys { schema, keys, path } => {
                write!(f, "{} received unhandled keys: {}.", schema, keys.join(", "))?;
                write_path(f, path)
            }
            Error::RequiredValueMissing { key, path } => {
                write!(f, "No value for required input: {}.", key)?;
                if path != key {
                    write_path(f, path)?;
                }
                Ok(())
            }
        }
    }
}

fn write_path(f: &mut fmt::Formatter<'_>, path: &str) -> fmt::Result {
    if path.is_empty() {
        Ok(())
    } else {
        write!(f, " (at {})", path)
    }
}

impl std::error::Error for Error {}

/// Category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A `permit` declaration bundled several attributes
    MultipleAttributes,
    /// A referenced schema is missing or the schema graph is unusable
    ConfigurationMissing,
    /// The input to `flex` was empty or not a map
    ValuesMissing,
    /// The input contained keys that were not declared
    UnhandledKeys,
    /// A required value was absent
    RequiredValueMissing,
}

impl ErrorKind {
    /// Returns true for kinds caused by input data.
    pub fn is_data_error(self) -> bool {
        matches!(
            self,
            ErrorKind::ValuesMissing | ErrorKind::UnhandledKeys | ErrorKind::RequiredValueMissing
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MultipleAttributes => write!(f, "multiple attributes"),
            ErrorKind::ConfigurationMissing => write!(f, "configuration missing"),
            ErrorKind::ValuesMissing => write!(f, "values missing"),
            ErrorKind::UnhandledKeys => write!(f, "unhandled keys"),
            ErrorKind::RequiredValueMissing => write!(f, "required value missing"),
        }
    }
}
