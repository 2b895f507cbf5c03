//! Engine configuration.

use serde::Deserialize;

/// Default limit on schema nesting during a single `flex` call.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default key under which clients may wrap their payload.
pub const DEFAULT_DATA_KEY: &str = "data";

/// How data errors that can be tolerated are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Unhandled keys and missing required values fail the call.
    #[default]
    Strict,
    /// Unhandled keys are dropped and missing required values skipped,
    /// each logged at `warn`.
    Lenient,
}

/// Settings shared by every `flex` call made through a
/// [`Flexer`](crate::Flexer).
///
/// Deserializable so hosts can keep it next to the rest of their settings;
/// missing fields take their defaults.
///
/// ```
/// use strong_arm::{FlexConfig, Strictness};
///
/// let config: FlexConfig = serde_json::from_str(r#"{"strictness": "lenient"}"#)?;
/// assert_eq!(config.strictness, Strictness::Lenient);
/// assert_eq!(config.max_depth, 32);
/// assert_eq!(config.data_key, "data");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlexConfig {
    /// Strict or lenient handling of tolerable data errors
    pub strictness: Strictness,
    /// Maximum schema nesting before the call fails
    pub max_depth: usize,
    /// Wrapper key that is unwrapped before validation
    pub data_key: String,
}

impl Default for FlexConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
            data_key: DEFAULT_DATA_KEY.to_string(),
        }
    }
}

impl FlexConfig {
    /// Strict configuration with defaults.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient configuration with defaults.
    pub fn lenient() -> Self {
        Self::default().with_strictness(Strictness::Lenient)
    }

    /// Sets the strictness.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the wrapper key.
    pub fn with_data_key(mut self, data_key: impl Into<String>) -> Self {
        self.data_key = data_key.into();
        self
    }

    pub(crate) fn is_lenient(&self) -> bool {
        self.strictness == Strictness::Lenient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let config = FlexConfig::default();
        assert_eq!(config.strictness, Strictness::Strict);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.data_key, DEFAULT_DATA_KEY);
        assert!(!config.is_lenient());
    }

    #[test]
    fn builders_override_fields() {
        let config = FlexConfig::strict()
            .with_max_depth(4)
            .with_data_key("payload")
            .with_strictness(Strictness::Lenient);

        assert_eq!(config.max_depth, 4);
        assert_eq!(config.data_key, "payload");
        assert!(config.is_lenient());
        assert!(FlexConfig::lenient().is_lenient());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: FlexConfig =
            serde_json::from_str(r#"{"max_depth": 8, "data_key": "payload"}"#).unwrap();

        assert_eq!(config.strictness, Strictness::Strict);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.data_key, "payload");
    }

    #[test]
    fn rejects_unknown_strictness() {
        let result: Result<FlexConfig, _> = serde_json::from_str(r#"{"strictness": "loose"}"#);
        assert!(result.is_err());
    }
}
