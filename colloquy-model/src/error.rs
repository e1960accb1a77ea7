use std::fmt::{self, Display};

/// Raised when a textual sort direction is not exactly `ASC` or `DESC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDirectionError {
    token: String,
}

impl InvalidDirectionError {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The rejected token, verbatim.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Display for InvalidDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is an invalid sorting order", self.token)
    }
}

impl std::error::Error for InvalidDirectionError {}
