//! Tracing subscriber initialisation.
//!
//! Only the binary installs a subscriber; `creator-core` and
//! `creator-adapters` only emit spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `PROJECT_CREATOR_DEBUG=True` raises the level to at least DEBUG.
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Environment switch that forces debug logging.
pub const DEBUG_ENV: &str = "PROJECT_CREATOR_DEBUG";
/// Older name of the same switch; still honoured.
const LEGACY_DEBUG_ENV: &str = "DJANGO_PROJECT_CREATOR_DEBUG";

const TARGETS: [&str; 3] = ["project_creator", "creator_core", "creator_adapters"];

/// Initialise the global tracing subscriber.
///
/// Must be called once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args, debug_forced());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(level == "trace")
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn debug_forced() -> bool {
    [DEBUG_ENV, LEGACY_DEBUG_ENV]
        .iter()
        .any(|name| std::env::var(name).is_ok_and(|v| is_true(&v)))
}

fn is_true(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

fn directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Translate the verbosity counter, quiet flag and debug switch to a level.
fn derive_level(args: &GlobalArgs, debug: bool) -> &'static str {
    if args.quiet && !debug {
        return "error";
    }
    match (args.verbose, debug) {
        (0, false) => "warn",
        (1, false) => "info",
        (0..=2, _) => "debug",
        _ => "trace",
    }
}
