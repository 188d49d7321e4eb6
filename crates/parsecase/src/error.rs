use std::fmt;

use thiserror::Error;

/// Boxed error returned by a [`Parser`](crate::Parser) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Width of the `Expected: ` / `Actual:   ` labels in a mismatch message.
pub(crate) const LABEL_WIDTH: usize = 10;

/// A fixture file could not be split into cases.
///
/// `context` holds the text from the point where extraction stopped, one
/// `  | `-prefixed line per source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected file format in {file_name} around\n\n{context}")]
pub struct MalformedFixtureError {
    pub file_name: String,
    pub context: String,
}

/// Errors from [`file_tests`](crate::file_tests).
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Malformed(#[from] MalformedFixtureError),

    #[error("Invalid config for case '{case}' in {file_name}: {source}")]
    InvalidConfig {
        file_name: String,
        case: String,
        source: serde_json::Error,
    },

    #[error("Config for case '{case}' in {file_name} must be a JSON object")]
    ConfigNotObject { file_name: String, case: String },
}

/// The serialized tree differs from the expected one.
///
/// Displays as three lines: the expected string, a caret under the first
/// differing character, and the actual string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CaseMismatchError {
    pub expected: String,
    pub actual: String,
    /// Character index of the first difference.
    pub index: usize,
}

impl fmt::Display for CaseMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Expected: {}", self.expected)?;
        writeln!(f, "{}^", " ".repeat(self.index + LABEL_WIDTH))?;
        write!(f, "Actual:   {}", self.actual)
    }
}

/// Errors from [`Case::run`](crate::Case::run).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Mismatch(#[from] CaseMismatchError),

    #[error("Failed to configure parser: {0}")]
    Configure(#[source] BoxError),

    #[error("Failed to parse input: {0}")]
    Parse(#[source] BoxError),
}

impl RunError {
    pub fn as_mismatch(&self) -> Option<&CaseMismatchError> {
        match self {
            RunError::Mismatch(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}
