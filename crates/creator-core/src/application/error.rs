//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the outside
//! world (processes, filesystem), not in the patching rules. Rule
//! violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The program could not be started at all (not installed, not on PATH).
    #[error("Could not run '{program}': {reason}")]
    CommandUnavailable { program: String, reason: String },

    /// The program ran and exited unsuccessfully.
    #[error("Command `{command}` failed ({status})")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The template did not ship the example env file.
    #[error("Example env file not found: {path}")]
    MissingEnvExample { path: PathBuf },

    /// A file a patch targets does not exist in the project.
    #[error("File to patch not found: {path}")]
    PatchTargetMissing { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// Lock on an in-memory adapter was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandUnavailable { program, .. } => {
                let mut s = vec![format!("'{program}' is not installed or not on your PATH")];
                match program.as_str() {
                    "git" => s.push("Install git: https://git-scm.com/downloads".into()),
                    "django-admin" => s.push("Install Django: pip install django".into()),
                    _ => s.push("Set generator.program in the config file".into()),
                }
                s
            }
            Self::CommandFailed { output, .. } => {
                let mut s = vec!["The external command exited with an error".into()];
                if let Some(last) = output.lines().rev().find(|l| !l.trim().is_empty()) {
                    s.push(format!("Last output line: {}", last.trim()));
                }
                s.push("Re-run with -vv to see the full command output".into());
                s
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::MissingEnvExample { path } => vec![
                format!("Expected the template to contain {}", path.display()),
                "Check template.url points at the right repository".into(),
            ],
            Self::PatchTargetMissing { path } => vec![
                format!("{} does not exist", path.display()),
                "Run the patch command from a project created by the generator".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Remove {} by hand before retrying", path.display()),
            ],
            Self::LockPoisoned => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CommandUnavailable { .. }
            | Self::MissingEnvExample { .. }
            | Self::PatchTargetMissing { .. } => ErrorCategory::NotFound,
            Self::CommandFailed { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_git_suggests_install() {
        let err = ApplicationError::CommandUnavailable {
            program: "git".into(),
            reason: "No such file or directory".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("git-scm")));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn failed_command_surfaces_last_output_line() {
        let err = ApplicationError::CommandFailed {
            command: "git clone x y".into(),
            status: "exit status: 128".into(),
            output: "Cloning into 'y'...\nfatal: repository 'x' not found\n\n".into(),
        };
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("fatal: repository 'x' not found"))
        );
        assert_eq!(err.category(), ErrorCategory::External);
    }
}
