//! Subprocess execution with captured output

use crate::error::{DevOpsError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished subprocess
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited zero
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a program to completion, capturing stdout/stderr/exit code
///
/// A missing binary is distinguished from other spawn failures so tools can
/// surface an instructive message.
pub async fn run_command(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<CommandOutput> {
    debug!(program, ?args, "running command");

    let mut command = Command::new(program);
    command.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DevOpsError::ProgramNotFound(program.to_string())
        } else {
            DevOpsError::Spawn {
                program: program.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    Ok(CommandOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_distinguished() {
        let err = run_command("definitely-not-a-real-binary-12345", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, DevOpsError::ProgramNotFound(_)));
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let output = run_command("sh", &["-c", "echo hello && exit 3"], None)
            .await
            .unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout.trim(), "hello");
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_captures_stderr() {
        let output = run_command("sh", &["-c", "echo oops >&2"], None)
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stderr.trim(), "oops");
    }
}
