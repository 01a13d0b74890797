//! External process runner using std::process.

use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, instrument, trace};

use creator_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    domain::CommandSpec,
    error::CreatorResult,
};

/// Production runner: spawns the program, waits, captures output.
///
/// Always checks the exit status. There is no timeout: a hung generator
/// or clone blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip_all, fields(program = command.program()))]
    fn run(&self, command: &CommandSpec) -> CreatorResult<CommandOutput> {
        debug!(command = %command, "Running");

        let mut process = Command::new(command.program());
        process
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = command.cwd() {
            process.current_dir(dir);
        }

        let output = process
            .output()
            .map_err(|e| spawn_error(command.program(), e))?;

        let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        transcript.push_str(&String::from_utf8_lossy(&output.stderr));
        trace!(%transcript, "Command output");

        if !output.status.success() {
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                output: transcript,
            }
            .into());
        }

        Ok(CommandOutput {
            code: output.status.code(),
            transcript,
        })
    }
}

fn spawn_error(program: &str, e: io::Error) -> creator_core::error::CreatorError {
    ApplicationError::CommandUnavailable {
        program: program.to_string(),
        reason: e.to_string(),
    }
    .into()
}
