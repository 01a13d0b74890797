//! Flags accepted before or after any subcommand, and by the bare
//! `project-creator <LOCATION>` invocation.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log level: none=warn, -v=info, -vv=debug, -vvv=trace.
    /// `PROJECT_CREATOR_DEBUG=true` raises it to at least debug.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (repeat up to -vvv)",
        long_help = "Log more detail to stderr:
    (none)  - warnings only
    -v      - each pipeline step and patch file
    -vv     - every django-admin/git command line, merge decisions
    -vvv    - also the captured output of those commands
RUST_LOG, when set, replaces these levels."
    )]
    pub verbose: u8,

    /// Only errors reach the terminal; progress, plans and summaries are dropped.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Plain, uncoloured messages and spinner (also set by NO_COLOR)"
    )]
    pub no_color: bool,

    /// Replaces the discovered `.project-creator.toml` / user config file.
    /// Unlike those, a missing file here is an error.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the discovered config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How plans, patch summaries and errors are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of everything the commands print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped; `[output] format` can pin it.
    #[default]
    Auto,
    /// Coloured marks and headers.
    Human,
    /// The same lines with no escape codes.
    Plain,
    /// One JSON document on stdout; errors as JSON on stderr.
    Json,
}
