//! External command execution.
//!
//! The migration only ever needs "run this command line in the project
//! directory, let it talk to the terminal, fail if it fails". [`ProcessRunner`]
//! is that capability; [`ShellRunner`] is the real one.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::MigrateError;

/// Why a command did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    pub command: String,
    /// Exit status, when the process exited normally
    pub status: Option<i32>,
    /// Spawn error or similar, when there is no status
    pub reason: Option<String>,
}

impl From<CommandFailure> for MigrateError {
    fn from(failure: CommandFailure) -> Self {
        MigrateError::CommandFailed {
            command: failure.command,
            status: failure.status,
            reason: failure.reason,
        }
    }
}

pub trait ProcessRunner {
    /// Run `command` in `cwd`, blocking until it exits.
    fn run(&self, command: &str, cwd: &Path) -> Result<(), CommandFailure>;
}

/// Runs commands through the platform shell with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<(), CommandFailure> {
        info!("running `{}` in {}", command, cwd.display());
        let status = Self::shell_command(command)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| CommandFailure {
                command: command.to_string(),
                status: None,
                reason: Some(e.to_string()),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandFailure {
                command: command.to_string(),
                status: status.code(),
                reason: None,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn successful_command() {
        let tmp = TempDir::new().expect("temp dir");
        ShellRunner
            .run("touch marker", tmp.path())
            .expect("command succeeds");
        assert!(tmp.path().join("marker").exists());
    }

    #[test]
    fn failing_command_reports_status() {
        let tmp = TempDir::new().expect("temp dir");
        let failure = ShellRunner.run("exit 3", tmp.path()).unwrap_err();
        assert_eq!(failure.command, "exit 3");
        assert_eq!(failure.status, Some(3));

        let err: MigrateError = failure.into();
        assert!(err.to_string().contains("exit status 3"));
    }

    #[test]
    fn missing_directory_is_a_spawn_failure() {
        let tmp = TempDir::new().expect("temp dir");
        let failure = ShellRunner
            .run("true", &tmp.path().join("does-not-exist"))
            .unwrap_err();
        assert_eq!(failure.status, None);
        assert!(failure.reason.is_some());
    }
}
