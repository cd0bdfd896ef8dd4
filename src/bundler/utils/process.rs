//! External tool execution.
//!
//! Every external tool (freeze tool, installer compiler, disk image tool,
//! native package build system) is run through [`run_tool`], which captures
//! its exit status and output and applies the run's [`ToolFailurePolicy`].

use crate::bundler::error::{Error, Result};
use std::process::ExitStatus;
use tokio::process::Command;

/// What to do when an external tool exits unsuccessfully.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolFailurePolicy {
    /// Fail the pipeline with [`Error::ToolFailed`].
    #[default]
    Abort,
    /// Log a warning and carry on with the next step.
    Warn,
}

/// Captured result of one external tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    /// Rendered command line
    pub command: String,
    /// Exit status
    pub status: ExitStatus,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Builds a command from an argv-style list such as `["python", "setup.py", "build_exe"]`.
pub fn command_from_argv(argv: &[String]) -> Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::GenericError("empty tool command".into()))?;
    let mut command = Command::new(program);
    command.args(args);
    Ok(command)
}

/// Renders a command line for logs and error messages.
pub fn describe(command: &Command) -> String {
    let std = command.as_std();
    std::iter::once(std.get_program())
        .chain(std.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs an external tool to completion and captures its output.
///
/// A tool that cannot be started always fails with
/// [`Error::CommandFailed`]. A tool that exits unsuccessfully fails with
/// [`Error::ToolFailed`] under [`ToolFailurePolicy::Abort`] and is only
/// logged under [`ToolFailurePolicy::Warn`].
pub async fn run_tool(command: &mut Command, policy: ToolFailurePolicy) -> Result<ToolOutput> {
    let rendered = describe(command);
    log::info!("Running {}", rendered);

    let output = command
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: rendered.clone(),
            error,
        })?;

    let result = ToolOutput {
        command: rendered,
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !result.stdout.trim().is_empty() {
        log::debug!("{} stdout:\n{}", result.command, result.stdout.trim_end());
    }
    if !result.stderr.trim().is_empty() {
        log::debug!("{} stderr:\n{}", result.command, result.stderr.trim_end());
    }

    if !result.success() {
        match policy {
            ToolFailurePolicy::Abort => {
                return Err(Error::ToolFailed {
                    command: result.command,
                    code: result.status.code(),
                    stderr: result.stderr.trim().to_string(),
                });
            }
            ToolFailurePolicy::Warn => {
                log::warn!(
                    "{} exited with {:?}, continuing: {}",
                    result.command,
                    result.status.code(),
                    result.stderr.trim()
                );
            }
        }
    }

    Ok(result)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        command_from_argv(&["sh".into(), "-c".into(), script.into()]).unwrap()
    }

    #[tokio::test]
    async fn captures_stdout_of_successful_tool() {
        let output = run_tool(&mut sh("echo packaged"), ToolFailurePolicy::Abort)
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "packaged");
    }

    #[tokio::test]
    async fn abort_policy_turns_exit_code_into_error() {
        let err = run_tool(&mut sh("echo broken >&2; exit 3"), ToolFailurePolicy::Abort)
            .await
            .unwrap_err();
        match err {
            Error::ToolFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn warn_policy_continues() {
        let output = run_tool(&mut sh("exit 4"), ToolFailurePolicy::Warn)
            .await
            .unwrap();
        assert_eq!(output.status.code(), Some(4));
    }

    #[tokio::test]
    async fn missing_tool_always_fails() {
        let mut command = Command::new("definitely-not-an-installed-tool");
        let err = run_tool(&mut command, ToolFailurePolicy::Warn)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[test]
    fn describe_renders_full_command_line() {
        let command = command_from_argv(&["python3".into(), "setup.py".into(), "bdist_rpm".into()])
            .unwrap();
        assert_eq!(describe(&command), "python3 setup.py bdist_rpm");
        assert!(command_from_argv(&[]).is_err());
    }
}
