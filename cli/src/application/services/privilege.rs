//! Privilege escalation for commands that modify the system.
//!
//! Containers usually run as root, where commands run as-is. Otherwise
//! `sudo -E` is prefixed so `DEBIAN_FRONTEND` and `TZ` survive the switch.

use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter, ToolLocator};
use crate::application::services::tolerate;
use crate::domain::Tolerated;

/// How privileged commands are launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Privilege {
    sudo: bool,
}

impl Privilege {
    /// Run privileged commands directly.
    #[must_use]
    pub fn direct() -> Self {
        Self { sudo: false }
    }

    /// Run privileged commands through `sudo -E`.
    #[must_use]
    pub fn sudo() -> Self {
        Self { sudo: true }
    }

    fn argv<'a>(self, program: &'a str, args: &[&'a str]) -> (&'a str, Vec<&'a str>) {
        if self.sudo {
            let mut full = vec!["-E", program];
            full.extend_from_slice(args);
            ("sudo", full)
        } else {
            (program, args.to_vec())
        }
    }

    /// Run a privileged command and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    pub async fn run(
        self,
        runner: &impl CommandRunner,
        program: &str,
        args: &[&str],
    ) -> Result<Output> {
        let (program, argv) = self.argv(program, args);
        runner.run(program, &argv).await
    }

    /// Run a privileged command with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    pub async fn run_status(
        self,
        runner: &impl CommandRunner,
        program: &str,
        args: &[&str],
    ) -> Result<ExitStatus> {
        let (program, argv) = self.argv(program, args);
        runner.run_status(program, &argv).await
    }
}

/// Numeric user and group of the invoking user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIds {
    pub uid: u32,
    pub gid: u32,
}

async fn id_field(runner: &impl CommandRunner, flag: &str) -> Option<u32> {
    let out = runner.run("id", &[flag]).await.ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8_lossy(&out.stdout).trim().parse().ok()
}

/// Query `id -u` / `id -g`. `None` when either cannot be determined.
pub async fn current_ids(runner: &impl CommandRunner) -> Option<UserIds> {
    let uid = id_field(runner, "-u").await?;
    let gid = id_field(runner, "-g").await?;
    Some(UserIds { uid, gid })
}

/// Decide how to run privileged commands for this run.
pub async fn detect(
    runner: &impl CommandRunner,
    locator: &impl ToolLocator,
    reporter: &impl ProgressReporter,
    tolerated: &mut Vec<Tolerated>,
) -> Privilege {
    if id_field(runner, "-u").await == Some(0) {
        reporter.step("running as root");
        return Privilege::direct();
    }
    if locator.is_available("sudo") {
        reporter.step("not root, using sudo for system changes");
        return Privilege::sudo();
    }
    tolerate(reporter, tolerated, Tolerated::NoPrivilegeEscalation);
    Privilege::direct()
}
