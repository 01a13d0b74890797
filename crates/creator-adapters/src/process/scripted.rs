//! Scripted process runner for testing.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use creator_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    domain::CommandSpec,
    error::CreatorResult,
};

/// Callback standing in for a program.
pub type ScriptedHandler = Arc<dyn Fn(&CommandSpec) -> CreatorResult<CommandOutput> + Send + Sync>;

/// Runner that never spawns anything.
///
/// Every call is recorded. Programs with a registered handler run it
/// (handlers typically write files into a `MemoryFilesystem` to imitate
/// the real tool); other programs succeed with empty output.
#[derive(Clone, Default)]
pub struct ScriptedCommandRunner {
    handlers: Arc<Mutex<HashMap<String, ScriptedHandler>>>,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `program`.
    pub fn on<F>(self, program: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> CreatorResult<CommandOutput> + Send + Sync + 'static,
    {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.insert(program.into(), Arc::new(handler));
        }
        self
    }

    /// Make `program` exit unsuccessfully with `output`.
    pub fn failing(self, program: impl Into<String>, output: impl Into<String>) -> Self {
        let output = output.into();
        self.on(program, move |cmd| {
            Err(ApplicationError::CommandFailed {
                command: cmd.to_string(),
                status: "exit status: 1".into(),
                output: output.clone(),
            }
            .into())
        })
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Programs run so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.program().to_string())
            .collect()
    }
}

impl CommandRunner for ScriptedCommandRunner {
    fn run(&self, command: &CommandSpec) -> CreatorResult<CommandOutput> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(command.clone());

        let handler = self
            .handlers
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .get(command.program())
            .cloned();

        match handler {
            Some(handler) => handler(command),
            None => Ok(CommandOutput {
                code: Some(0),
                transcript: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let runner = ScriptedCommandRunner::new();
        runner.run(&CommandSpec::new("django-admin")).unwrap();
        runner.run(&CommandSpec::new("git").arg("clone")).unwrap();
        assert_eq!(runner.programs(), vec!["django-admin", "git"]);
        assert_eq!(runner.calls()[1].args(), ["clone".to_string()]);
    }

    #[test]
    fn failing_program_returns_command_failed() {
        let runner = ScriptedCommandRunner::new().failing("git", "fatal: unable to access");
        let err = runner.run(&CommandSpec::new("git")).unwrap_err();
        assert!(err.to_string().contains("failed"));
    }

    #[test]
    fn clones_share_state() {
        let runner = ScriptedCommandRunner::new();
        let handle = runner.clone();
        runner.run(&CommandSpec::new("git")).unwrap();
        assert_eq!(handle.calls().len(), 1);
    }
}
