//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use creator_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, DirEntryKind, Filesystem},
    },
    error::{CreatorError, CreatorResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> CreatorResult<Vec<DirEntry>> {
        let read = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "get file type"))?;
            entries.push(DirEntry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: if file_type.is_dir() {
                    DirEntryKind::Directory
                } else {
                    DirEntryKind::File
                },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> CreatorResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> CreatorResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CreatorResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> CreatorResult<()> {
        match std::fs::rename(from, to) {
            Ok(()) => Ok(()),
            // Cross-device moves cannot be renamed; copy then delete.
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(from = %from.display(), to = %to.display(), "Falling back to copy");
                copy_tree(from, to)?;
                if from.is_dir() {
                    self.remove_dir_all(from)
                } else {
                    self.remove_file(from)
                }
            }
            Err(e) => Err(map_io_error(from, e, "move")),
        }
    }

    fn remove_file(&self, path: &Path) -> CreatorResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> CreatorResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

/// Recursive copy of a file or directory tree.
fn copy_tree(from: &Path, to: &Path) -> CreatorResult<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| ApplicationError::FilesystemError {
            path: from.to_path_buf(),
            reason: format!("Failed to walk directory: {e}"),
        })?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let dest = to.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| map_io_error(&dest, e, "create directory"))?;
        } else {
            std::fs::copy(entry.path(), &dest).map_err(|e| map_io_error(&dest, e, "copy file"))?;
        }
    }
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CreatorError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_dir_includes_hidden_entries() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".gitignore"), "*.pyc\n").unwrap();
        std::fs::write(tmp.path().join("manage.py"), "").unwrap();
        std::fs::create_dir(tmp.path().join(".github")).unwrap();

        let names: Vec<_> = LocalFilesystem::new()
            .list_dir(tmp.path())
            .unwrap()
            .into_iter()
            .map(|e| (e.name, e.kind))
            .collect();
        assert_eq!(
            names,
            vec![
                (".github".to_string(), DirEntryKind::Directory),
                (".gitignore".to_string(), DirEntryKind::File),
                ("manage.py".to_string(), DirEntryKind::File),
            ]
        );
    }

    #[test]
    fn rename_moves_directory_with_contents() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a");
        std::fs::create_dir_all(from.join("nested")).unwrap();
        std::fs::write(from.join("nested/file.txt"), "x").unwrap();

        let fs = LocalFilesystem::new();
        fs.rename(&from, &tmp.path().join("b")).unwrap();
        assert!(!fs.exists(&from));
        assert_eq!(
            fs.read_to_string(&tmp.path().join("b/nested/file.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn copy_tree_copies_everything() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("src");
        std::fs::create_dir_all(from.join("d")).unwrap();
        std::fs::write(from.join(".env.example"), "A=1").unwrap();
        std::fs::write(from.join("d/f"), "y").unwrap();

        let to = tmp.path().join("dst");
        copy_tree(&from, &to).unwrap();
        assert_eq!(std::fs::read_to_string(to.join(".env.example")).unwrap(), "A=1");
        assert_eq!(std::fs::read_to_string(to.join("d/f")).unwrap(), "y");
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&tmp.path().join("nope.py"))
            .unwrap_err();
        assert!(matches!(
            err,
            CreatorError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
