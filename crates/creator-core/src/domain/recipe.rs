//! Project recipes.
//!
//! A [`ProjectRecipe`] is the data-only description of one pipeline run:
//! which generator to call, which template repository to merge, which env
//! file to activate and which patches to apply. The built-in Django recipe
//! lives in `creator-adapters`; the core only knows the shape.

use std::collections::HashSet;
use std::path::Path;

use super::{CommandSpec, DomainError, FilePatch, RelativePath};

/// The external project generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    pub program: String,
    pub subcommand: String,
    pub project_name: String,
}

impl GeneratorSpec {
    /// `<program> <subcommand> <project_name> <location>`
    pub fn command(&self, location: &Path) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg(&self.subcommand)
            .arg(&self.project_name)
            .path_arg(location)
    }
}

/// The remote template repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRepository {
    pub url: String,
    pub branch: Option<String>,
    pub shallow: bool,
}

impl TemplateRepository {
    /// `git clone [--depth 1] [--branch <b>] <url> <dest>`
    pub fn clone_command(&self, dest: &Path) -> CommandSpec {
        let mut cmd = CommandSpec::new("git").arg("clone");
        if self.shallow {
            cmd = cmd.arg("--depth").arg("1");
        }
        if let Some(branch) = self.branch.as_deref().filter(|b| !b.is_empty()) {
            cmd = cmd.arg("--branch").arg(branch);
        }
        cmd.arg(&self.url).path_arg(dest)
    }
}

/// Committed example env file and the active name it is renamed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileSpec {
    pub example: RelativePath,
    pub active: RelativePath,
}

/// Everything one run of the pipeline needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecipe {
    pub name: String,
    pub generator: GeneratorSpec,
    pub template: TemplateRepository,
    pub env_file: EnvFileSpec,
    pub patches: Vec<FilePatch>,
}

impl ProjectRecipe {
    /// Look up a patch by name (`wsgi`, `urls`, `settings`, ...).
    pub fn patch(&self, name: &str) -> Option<&FilePatch> {
        self.patches.iter().find(|p| p.name() == name)
    }

    pub fn patch_names(&self) -> Vec<&str> {
        self.patches.iter().map(FilePatch::name).collect()
    }

    /// Keep only the named patches, in recipe order.
    pub fn retain_patches(&mut self, names: &[String]) -> Result<(), DomainError> {
        for name in names {
            if self.patch(name).is_none() {
                return Err(DomainError::InvalidRecipe(format!(
                    "unknown patch '{name}' (available: {})",
                    self.patch_names().join(", ")
                )));
            }
        }
        self.patches.retain(|p| names.iter().any(|n| n == p.name()));
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.generator.program.trim().is_empty() {
            return Err(DomainError::InvalidRecipe("generator program is empty".into()));
        }
        if self.generator.project_name.trim().is_empty() {
            return Err(DomainError::InvalidRecipe("project name is empty".into()));
        }
        if self.template.url.trim().is_empty() {
            return Err(DomainError::InvalidRecipe("template url is empty".into()));
        }

        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        for patch in &self.patches {
            if !names.insert(patch.name()) {
                return Err(DomainError::InvalidRecipe(format!(
                    "duplicate patch name '{}'",
                    patch.name()
                )));
            }
            if !paths.insert(patch.path()) {
                return Err(DomainError::InvalidRecipe(format!(
                    "two patches target {}",
                    patch.path()
                )));
            }
            if patch.edits().is_empty() {
                return Err(DomainError::InvalidRecipe(format!(
                    "patch '{}' has no edits",
                    patch.name()
                )));
            }
            if patch.edits().iter().any(|e| e.anchor() == Some("")) {
                return Err(DomainError::EmptyAnchor {
                    file: patch.path().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Edit;

    fn recipe() -> ProjectRecipe {
        ProjectRecipe {
            name: "test".into(),
            generator: GeneratorSpec {
                program: "django-admin".into(),
                subcommand: "startproject".into(),
                project_name: "conf".into(),
            },
            template: TemplateRepository {
                url: "https://example.com/base.git".into(),
                branch: None,
                shallow: false,
            },
            env_file: EnvFileSpec {
                example: RelativePath::new("env.example"),
                active: RelativePath::new(".env"),
            },
            patches: vec![
                FilePatch::new("wsgi", RelativePath::new("conf/wsgi.py"))
                    .with_edit(Edit::append("x\n")),
                FilePatch::new("urls", RelativePath::new("conf/urls.py"))
                    .with_edit(Edit::append("y\n")),
            ],
        }
    }

    #[test]
    fn generator_command_line() {
        let cmd = recipe().generator.command(Path::new("/tmp/proj1"));
        assert_eq!(cmd.to_string(), "django-admin startproject conf /tmp/proj1");
    }

    #[test]
    fn clone_command_honours_branch_and_depth() {
        let mut template = recipe().template;
        assert_eq!(
            template.clone_command(Path::new("/tmp/x")).to_string(),
            "git clone https://example.com/base.git /tmp/x"
        );

        template.shallow = true;
        template.branch = Some("develop".into());
        assert_eq!(
            template.clone_command(Path::new("/tmp/x")).to_string(),
            "git clone --depth 1 --branch develop https://example.com/base.git /tmp/x"
        );
    }

    #[test]
    fn empty_branch_means_default_branch() {
        let mut template = recipe().template;
        template.branch = Some(String::new());
        assert!(!template.clone_command(Path::new("/tmp/x")).args().contains(&"--branch".to_string()));
    }

    #[test]
    fn valid_recipe_passes() {
        assert!(recipe().validate().is_ok());
    }

    #[test]
    fn duplicate_patch_names_rejected() {
        let mut r = recipe();
        r.patches.push(
            FilePatch::new("wsgi", RelativePath::new("conf/other.py")).with_edit(Edit::append("z")),
        );
        assert!(matches!(r.validate(), Err(DomainError::InvalidRecipe(_))));
    }

    #[test]
    fn empty_generator_rejected() {
        let mut r = recipe();
        r.generator.program = "  ".into();
        assert!(r.validate().is_err());
    }

    #[test]
    fn retain_patches_filters_in_order() {
        let mut r = recipe();
        r.retain_patches(&["urls".to_string()]).unwrap();
        assert_eq!(r.patch_names(), vec!["urls"]);
    }

    #[test]
    fn retain_unknown_patch_is_error() {
        let mut r = recipe();
        assert!(r.retain_patches(&["nope".to_string()]).is_err());
        assert_eq!(r.patches.len(), 2);
    }
}
