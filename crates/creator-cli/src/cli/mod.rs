//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Creating a project is the default action, so `project-creator <LOCATION>`
/// needs no subcommand. The maintenance commands are subcommands.
#[derive(Debug, Parser)]
#[command(
    name     = "project-creator",
    bin_name = "project-creator",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create a pre-configured Django project",
    long_about = "Runs `django-admin startproject`, merges the base-project \
                  template into it, activates the .env file and patches \
                  wsgi.py, urls.py and settings.py.\n\n\
                  Supports Django 2.2 projects: the patches match the files \
                  its startproject generates. Newer releases lay them out \
                  differently and stop with 'Anchor not found'.",
    after_help = "EXAMPLES:\n\
        \x20 project-creator /tmp/proj1\n\
        \x20 project-creator ./site --allow-existing-empty --branch develop\n\
        \x20 project-creator ./site --dry-run\n\
        \x20 project-creator patch ./site --check",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub create: CreateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse `std::env::args`, rejecting create options mixed with a
    /// subcommand.
    pub fn try_parse_checked() -> Result<Self, clap::Error> {
        Self::try_parse()?.checked()
    }

    fn checked(self) -> Result<Self, clap::Error> {
        let conflict = match &self.command {
            Some(command) if self.create.is_used() => Some(command.name()),
            _ => None,
        };
        match conflict {
            Some(name) => Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                format!("LOCATION and create options cannot be used with the '{name}' subcommand"),
            )),
            None => Ok(self),
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Re-apply the recipe's patches to an existing project.
    #[command(
        about = "Patch an existing project",
        after_help = "EXAMPLES:\n\
            \x20 project-creator patch ./site\n\
            \x20 project-creator patch ./site --check\n\
            \x20 project-creator patch ./site --only settings,urls"
    )]
    Patch(PatchArgs),

    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 project-creator init           # user config directory\n\
            \x20 project-creator init --local   # ./.project-creator.toml"
    )]
    Init(InitArgs),

    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 project-creator config get template.url\n\
            \x20 project-creator config list\n\
            \x20 project-creator config path"
    )]
    Config(ConfigCommands),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 project-creator completions bash > ~/.local/share/bash-completion/completions/project-creator\n\
            \x20 project-creator completions zsh  > ~/.zfunc/_project-creator"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Patch(_) => "patch",
            Self::Init(_) => "init",
            Self::Config(_) => "config",
            Self::Completions(_) => "completions",
        }
    }
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for the default create action.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Directory to create. Must not exist unless
    /// `--allow-existing-empty` is given and it is empty.
    #[arg(value_name = "LOCATION", help = "Location for the new project")]
    pub location: Option<PathBuf>,

    #[arg(
        long = "allow-existing-empty",
        help = "Reuse the location if it is an existing empty directory"
    )]
    pub allow_existing_empty: bool,

    #[arg(
        long = "keep-on-failure",
        help = "Leave partial output in place when a step fails"
    )]
    pub keep_on_failure: bool,

    #[arg(long = "template-url", value_name = "URL", help = "Template repository to merge")]
    pub template_url: Option<String>,

    #[arg(long = "branch", value_name = "BRANCH", help = "Template branch to clone")]
    pub branch: Option<String>,

    #[arg(long = "generator", value_name = "PROGRAM", help = "Project generator program")]
    pub generator: Option<String>,

    #[arg(long = "dry-run", help = "Print what would run without touching anything")]
    pub dry_run: bool,

    #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
    pub yes: bool,
}

impl CreateArgs {
    /// Whether any create argument was given.
    pub fn is_used(&self) -> bool {
        self.location.is_some()
            || self.allow_existing_empty
            || self.keep_on_failure
            || self.template_url.is_some()
            || self.branch.is_some()
            || self.generator.is_some()
            || self.dry_run
            || self.yes
    }
}

// ── patch ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct PatchArgs {
    #[arg(value_name = "PROJECT_DIR", help = "Root of the project to patch")]
    pub project_dir: PathBuf,

    /// Exit with code 5 if any edit would change a file; write nothing.
    #[arg(long = "check", help = "Report pending edits without writing")]
    pub check: bool,

    #[arg(
        long = "only",
        value_enum,
        value_delimiter = ',',
        value_name = "FILE",
        help = "Restrict to some patches"
    )]
    pub only: Vec<PatchTarget>,
}

/// Patches of the built-in recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatchTarget {
    Wsgi,
    Urls,
    Settings,
}

impl PatchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wsgi => "wsgi",
            Self::Urls => "urls",
            Self::Settings => "settings",
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.project-creator.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `template.url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn location_without_subcommand() {
        let cli = Cli::parse_from(["project-creator", "/tmp/proj1", "--keep-on-failure"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.create.location, Some(PathBuf::from("/tmp/proj1")));
        assert!(cli.create.keep_on_failure);
        assert!(!cli.create.allow_existing_empty);
    }

    #[test]
    fn create_overrides() {
        let cli = Cli::parse_from([
            "project-creator",
            "./site",
            "--branch",
            "develop",
            "--template-url",
            "https://example.com/t.git",
            "-y",
        ]);
        assert_eq!(cli.create.branch.as_deref(), Some("develop"));
        assert_eq!(
            cli.create.template_url.as_deref(),
            Some("https://example.com/t.git")
        );
        assert!(cli.create.yes);
    }

    #[test]
    fn parse_patch_with_only() {
        let cli = Cli::parse_from([
            "project-creator",
            "patch",
            "./site",
            "--check",
            "--only",
            "settings,urls",
        ]);
        match cli.command {
            Some(Commands::Patch(args)) => {
                assert!(args.check);
                assert_eq!(args.only, vec![PatchTarget::Settings, PatchTarget::Urls]);
            }
            other => panic!("expected patch, got {other:?}"),
        }
    }

    #[test]
    fn unknown_patch_target_rejected() {
        let result = Cli::try_parse_from(["project-creator", "patch", ".", "--only", "models"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["project-creator", "config", "list", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["project-creator", "-v", "patch", "./site"])
            .and_then(Cli::checked)
            .unwrap();
        assert_eq!(cli.global.verbose, 1);
        assert!(cli.create.location.is_none());
        match cli.command {
            Some(Commands::Patch(args)) => assert_eq!(args.project_dir, PathBuf::from("./site")),
            other => panic!("expected patch, got {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "project-creator",
            "--config",
            "f.toml",
            "--output-format",
            "json",
            "config",
            "list",
        ])
        .and_then(Cli::checked)
        .unwrap();
        assert_eq!(cli.global.config, Some(PathBuf::from("f.toml")));
        assert_eq!(cli.global.output_format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommands::List))
        ));
    }

    #[test]
    fn create_options_rejected_with_subcommand() {
        let err = Cli::try_parse_from(["project-creator", "--dry-run", "patch", "./site"])
            .and_then(Cli::checked)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn location_before_subcommand_rejected() {
        let result = Cli::try_parse_from(["project-creator", "./site", "patch", "x"])
            .and_then(Cli::checked);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["project-creator", "--quiet", "--verbose", "/tmp/x"]);
        assert!(result.is_err());
    }
}
