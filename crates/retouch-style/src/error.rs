//! Error types for the override engine.

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the override engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manually edited selector failed syntax validation.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A variable operation referenced an unknown name.
    #[error("Unknown variable '{name}'")]
    UnknownVariable { name: String },

    /// A variable that was discovered in the page cannot be deleted.
    #[error("Variable '{name}' was discovered in the page and cannot be deleted")]
    VariableNotDeletable { name: String },

    /// A shadow edit referenced an index outside the list.
    #[error("Shadow index {index} is out of range (list has {len} records)")]
    ShadowIndexOutOfRange { index: usize, len: usize },

    /// An operation referenced a selector with no tracked overrides.
    #[error("No overrides tracked for selector '{selector}'")]
    UnknownSelector { selector: String },
}

impl Error {
    /// Create a selector validation error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-variable error.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create an unknown-selector error.
    pub fn unknown_selector(selector: impl Into<String>) -> Self {
        Self::UnknownSelector {
            selector: selector.into(),
        }
    }
}
