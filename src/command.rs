// External command execution: every adapter reads tool output through a CommandRunner.

use crate::error::AdapterError;
use futures_util::future::{BoxFuture, try_join_all};
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;

/// A program plus its arguments, e.g. `docker ps --all --format json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs a command and returns its standard output.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, Result<String, AdapterError>>;
}

/// Spawns real processes, bounded by `timeout`. The child is killed if the bound is hit.
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, Result<String, AdapterError>> {
        Box::pin(async move {
            debug!(command = %spec, "spawning");
            let mut command = tokio::process::Command::new(&spec.program);
            command
                .args(&spec.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let output = tokio::time::timeout(self.timeout, command.output())
                .await
                .map_err(|_| AdapterError::Timeout {
                    program: spec.program.clone(),
                    after: self.timeout,
                })?
                .map_err(|source| AdapterError::Spawn {
                    program: spec.program.clone(),
                    source,
                })?;

            if !output.status.success() {
                return Err(AdapterError::ExitStatus {
                    program: spec.program.clone(),
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        })
    }
}

/// Runs all commands concurrently and waits for every one of them.
/// Outputs come back in the order of `specs`; the first failure fails the whole call.
pub async fn run_all(
    runner: &dyn CommandRunner,
    specs: &[CommandSpec],
) -> Result<Vec<String>, AdapterError> {
    try_join_all(specs.iter().map(|spec| runner.run(spec))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_displays_as_shell_line() {
        let spec = CommandSpec::new("sensors", ["-j"]);
        assert_eq!(spec.to_string(), "sensors -j");
    }

    #[tokio::test]
    async fn process_runner_reports_missing_binary_as_spawn_error() {
        let runner = ProcessRunner::new(Duration::from_secs(5));
        let spec = CommandSpec::new("definitely-not-a-real-binary-4f1c", Vec::<String>::new());
        let err = runner.run(&spec).await.unwrap_err();
        assert!(matches!(err, AdapterError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_returns_stdout() {
        let runner = ProcessRunner::new(Duration::from_secs(5));
        let spec = CommandSpec::new("echo", ["hello"]);
        assert_eq!(runner.run(&spec).await.unwrap(), "hello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_fails_on_non_zero_exit() {
        let runner = ProcessRunner::new(Duration::from_secs(5));
        let spec = CommandSpec::new("false", Vec::<String>::new());
        let err = runner.run(&spec).await.unwrap_err();
        assert!(matches!(err, AdapterError::ExitStatus { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_times_out() {
        let runner = ProcessRunner::new(Duration::from_millis(50));
        let spec = CommandSpec::new("sleep", ["5"]);
        let err = runner.run(&spec).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
