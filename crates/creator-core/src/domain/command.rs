//! External command descriptions.

use std::fmt;
use std::path::{Path, PathBuf};

/// A process to run: program, arguments, optional working directory.
///
/// Pure data; the `CommandRunner` port executes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = CommandSpec::new("git")
            .arg("clone")
            .arg("https://example.com/repo.git")
            .arg("/tmp/my project");
        assert_eq!(
            cmd.to_string(),
            "git clone https://example.com/repo.git \"/tmp/my project\""
        );
    }

    #[test]
    fn builder_records_cwd() {
        let cmd = CommandSpec::new("django-admin").current_dir("/tmp");
        assert_eq!(cmd.cwd(), Some(Path::new("/tmp")));
        assert!(cmd.args().is_empty());
    }
}
