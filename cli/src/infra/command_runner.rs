//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation. Every child gets
//! the runner's base environment (`TZ`, `DEBIAN_FRONTEND`) layered over the
//! inherited one, so the provisioner never mutates its own environment.

use std::process::{ExitStatus, Output, Stdio};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// Calls have no timeout: a hung tool hangs the run, and the container
/// platform's restart policy is the backstop.
#[derive(Clone)]
pub struct TokioCommandRunner {
    base_env: Arc<[(String, String)]>,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(base_env: Vec<(String, String)>) -> Self {
        Self {
            base_env: base_env.into(),
        }
    }

    fn command(&self, program: &str, args: &[&str]) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .envs(self.base_env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true);
        cmd
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_env(program, args, &[]).await
    }

    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Result<Output> {
        // Arguments are not logged: `aws configure set` carries secrets in argv.
        tracing::debug!(program, argc = args.len(), "running");
        // `output()` drains stdout and stderr concurrently with `wait()`, so a
        // chatty child cannot fill a pipe and deadlock.
        let output = self
            .command(program, args)
            .envs(envs.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("failed to spawn {program}"))?;
        tracing::debug!(program, status = %output.status, "finished");
        Ok(output)
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        tracing::debug!(program, argc = args.len(), "running with inherited stdio");
        let mut child = self
            .command(program, args)
            .stdin(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
