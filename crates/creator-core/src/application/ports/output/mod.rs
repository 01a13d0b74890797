//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `creator-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::PipelineStep;
use crate::domain::CommandSpec;
use crate::error::CreatorResult;

/// Captured result of a successful process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, when the platform reports one.
    pub code: Option<i32>,
    /// Standard output followed by standard error.
    pub transcript: String,
}

/// Port for running external processes.
///
/// Implemented by:
/// - `creator_adapters::process::SystemCommandRunner` (production)
/// - `creator_adapters::process::ScriptedCommandRunner` (testing)
///
/// Implementations must always capture output and must turn a non-zero
/// exit status into `ApplicationError::CommandFailed`; there is no
/// fire-and-forget variant.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> CreatorResult<CommandOutput>;
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntryKind {
    File,
    Directory,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: DirEntryKind,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `creator_adapters::filesystem::LocalFilesystem` (production)
/// - `creator_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the direct children of a directory, hidden entries included.
    ///
    /// Entries are sorted by name.
    fn list_dir(&self, path: &Path) -> CreatorResult<Vec<DirEntry>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CreatorResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> CreatorResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> CreatorResult<()>;

    /// Move a file or directory. `to` must not exist.
    fn rename(&self, from: &Path, to: &Path) -> CreatorResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> CreatorResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> CreatorResult<()>;
}

/// Port for progress notifications.
///
/// All methods default to no-ops so observers only implement what they
/// display.
pub trait PipelineObserver: Send + Sync {
    fn step_started(&self, _step: &PipelineStep) {}

    fn step_finished(&self, _step: &PipelineStep) {}

    fn step_skipped(&self, _step: &PipelineStep, _reason: &str) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

impl<T: Filesystem + ?Sized> Filesystem for std::sync::Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_dir(&self, path: &Path) -> CreatorResult<Vec<DirEntry>> {
        (**self).list_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> CreatorResult<()> {
        (**self).create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> CreatorResult<String> {
        (**self).read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> CreatorResult<()> {
        (**self).write_file(path, content)
    }

    fn rename(&self, from: &Path, to: &Path) -> CreatorResult<()> {
        (**self).rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> CreatorResult<()> {
        (**self).remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> CreatorResult<()> {
        (**self).remove_dir_all(path)
    }
}
