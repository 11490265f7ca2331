//! Kernel error type

use thiserror::Error;

/// Errors raised while parsing kernel values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Text that does not name a key of the expected kind
    #[error("'{input}' is not a valid {kind}: {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        input: String,
        reason: String,
    },
}

impl CoreError {
    pub fn invalid_identifier(
        kind: &'static str,
        input: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        CoreError::InvalidIdentifier {
            kind,
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
