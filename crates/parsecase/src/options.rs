//! Parser options passed to [`Parser::configure`](crate::Parser::configure).

use serde_json::{Map, Value};

/// Key of the option that toggles strict parsing.
pub const STRICT: &str = "strict";

/// An ordered set of parser options.
///
/// `strict` is the only key the harness itself knows about. Every other key
/// is grammar-specific and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserOptions(Map<String, Value>);

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used to run one fixture case: non-strict parsing, overridden
    /// by whatever the case header configures.
    pub fn for_case(config: Option<&Map<String, Value>>) -> Self {
        let mut options = Self::new().with(STRICT, false);
        if let Some(config) = config {
            options.merge(config);
        }
        options
    }

    /// Overwrite keys with the values from `overrides`.
    pub fn merge(&mut self, overrides: &Map<String, Value>) {
        for (key, value) in overrides {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// `Some(b)` when `key` holds a boolean, `None` when absent or of another
    /// type.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// The `strict` option, if set to a boolean.
    pub fn strict(&self) -> Option<bool> {
        self.bool(STRICT)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ParserOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
