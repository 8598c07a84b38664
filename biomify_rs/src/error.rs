//! Errors surfaced to the user as plain messages.
//!
//! Everything in [`MigrateError`] is expected and actionable, so the binary
//! prints it without a backtrace. Any other error reaching `main` is treated
//! as unexpected and printed with its full chain.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = MigrateError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MigrateError {
    /// No `package.json` in the start directory or any ancestor.
    #[error("no package.json found in {} or any parent directory", start.display())]
    ManifestNotFound { start: PathBuf },

    #[error("failed to parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("{}", describe_command_failure(command, *status, reason.as_deref()))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        reason: Option<String>,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read answer: {0}")]
    Prompt(#[source] std::io::Error),
}

impl MigrateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe_command_failure(command: &str, status: Option<i32>, reason: Option<&str>) -> String {
    match (status, reason) {
        (Some(code), _) => format!("command `{}` failed with exit status {}", command, code),
        (None, Some(reason)) => format!("command `{}` failed: {}", command, reason),
        (None, None) => format!("command `{}` was terminated by a signal", command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_names_command_and_status() {
        let err = MigrateError::CommandFailed {
            command: "pnpm add -D -E @biomejs/biome@2.2.0".to_string(),
            status: Some(1),
            reason: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("pnpm add -D -E @biomejs/biome@2.2.0"));
        assert!(msg.contains("exit status 1"));
    }

    #[test]
    fn command_failure_without_status_uses_reason() {
        let err = MigrateError::CommandFailed {
            command: "bun add".to_string(),
            status: None,
            reason: Some("No such file or directory".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "command `bun add` failed: No such file or directory"
        );
    }

    #[test]
    fn manifest_not_found_mentions_start_dir() {
        let err = MigrateError::ManifestNotFound {
            start: PathBuf::from("/tmp/project"),
        };
        assert!(err.to_string().contains("/tmp/project"));
    }
}
