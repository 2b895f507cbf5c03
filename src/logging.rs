use std::fmt;

/// A logger scoped to one schema at one position in the input.
///
/// `FlexLog` is created by the engine for every nested `flex` call. Every
/// message carries the schema label and the key path as structured fields,
/// so lenient-mode drops deep inside a payload can be traced back to where
/// they happened.
///
/// Input values are never logged, only key names.
#[derive(Debug)]
pub struct FlexLog<'a> {
    schema: &'a str,
    path: &'a str,
}

impl<'a> FlexLog<'a> {
    /// Creates a logger for `schema` at `path`.
    ///
    /// This is `pub(crate)` - only the engine scopes loggers.
    pub(crate) fn new(schema: &'a str, path: &'a str) -> Self {
        Self { schema, path }
    }

    /// Returns the schema label.
    pub fn schema(&self) -> &str {
        self.schema
    }

    /// Returns the key path; empty at the top level.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(schema = %self.schema, path = %self.path, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(schema = %self.schema, path = %self.path, "{}", args);
    }

    /// Logs a trace-level message.
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        tracing::trace!(schema = %self.schema, path = %self.path, "{}", args);
    }
}
