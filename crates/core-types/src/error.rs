use thiserror::Error;

/// The message every validation failure reports to the client.
pub const VALIDATION_MESSAGE: &str = "validation errors";

/// A rejected write. Carries one reason per offending field.
///
/// The reasons are meant for logs; clients only ever see
/// [`VALIDATION_MESSAGE`] through [`ValidationError::messages`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation errors: {}", .reasons.join("; "))]
pub struct ValidationError {
    reasons: Vec<String>,
}

impl ValidationError {
    pub fn new(reasons: Vec<String>) -> Self {
        Self { reasons }
    }

    pub fn single(reason: impl Into<String>) -> Self {
        Self { reasons: vec![reason.into()] }
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// The list rendered in the `errors` array of a client-error response.
    pub fn messages(&self) -> Vec<String> {
        vec![VALIDATION_MESSAGE.to_string()]
    }
}
