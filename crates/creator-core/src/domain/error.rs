// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Location Errors
    // ========================================================================
    #[error("Location already exists: {path}")]
    LocationExists { path: PathBuf },

    #[error("Location is not empty: {path}")]
    LocationNotEmpty { path: PathBuf },

    #[error("Location exists and is not a directory: {path}")]
    LocationNotDirectory { path: PathBuf },

    #[error("Location must not be empty")]
    EmptyLocation,

    // ========================================================================
    // Patch Errors
    // ========================================================================
    #[error("Anchor not found in {file}: {anchor:?}")]
    AnchorNotFound { file: String, anchor: String },

    #[error("Anchor found {count} times in {file} (expected exactly once): {anchor:?}")]
    AmbiguousAnchor {
        file: String,
        anchor: String,
        count: usize,
    },

    #[error("Edit in {file} has an empty anchor")]
    EmptyAnchor { file: String },

    // ========================================================================
    // Recipe Errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LocationExists { path } => vec![
                format!("The directory '{}' already exists", path.display()),
                "Choose a location that does not exist yet".into(),
                "Or pass --allow-existing-empty to reuse an empty directory".into(),
            ],
            Self::LocationNotEmpty { path } => vec![
                format!("'{}' already contains files", path.display()),
                "Only empty directories can be reused".into(),
            ],
            Self::LocationNotDirectory { path } => vec![
                format!("'{}' is a file, not a directory", path.display()),
                "Choose a different location".into(),
            ],
            Self::EmptyLocation => vec!["Pass the directory to create, e.g. ./my-site".into()],
            Self::AnchorNotFound { file, .. } => vec![
                format!("'{file}' does not look like the file this tool expects"),
                "The generator version may have changed its output".into(),
                "Check the installed framework version".into(),
            ],
            Self::AmbiguousAnchor { file, .. } => vec![
                format!("'{file}' has been edited by hand or by another tool"),
                "Restore the generated file and run the patch again".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LocationExists { .. }
            | Self::LocationNotEmpty { .. }
            | Self::LocationNotDirectory { .. }
            | Self::EmptyLocation
            | Self::AbsolutePathNotAllowed { .. }
            | Self::InvalidRecipe(_) => ErrorCategory::Validation,
            Self::AnchorNotFound { .. } => ErrorCategory::NotFound,
            Self::AmbiguousAnchor { .. } => ErrorCategory::Conflict,
            Self::EmptyAnchor { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
