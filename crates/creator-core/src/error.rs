//! Unified error handling for creator-core.
//!
//! Wraps domain and application errors behind one type with a category
//! and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for creator-core operations.
#[derive(Debug, Error, Clone)]
pub enum CreatorError {
    /// Errors from the domain layer (location rules, patch anchors).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (processes, filesystem).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CreatorError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in project-creator".into(),
                "Please report this issue at: https://github.com/arielcalzadadeveloper/django-project-creator/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    External,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CreatorResult<T> = Result<T, CreatorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_errors_display_without_prefix() {
        let err: CreatorError = DomainError::LocationExists {
            path: PathBuf::from("/tmp/proj1"),
        }
        .into();
        assert_eq!(err.to_string(), "Location already exists: /tmp/proj1");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn anchor_miss_is_not_found() {
        let err: CreatorError = DomainError::AnchorNotFound {
            file: "conf/wsgi.py".into(),
            anchor: "import os".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.suggestions().is_empty());
    }
}
