//! Application services: use-case orchestration.
//!
//! Each service module implements a single provisioning step by composing
//! domain logic with port trait calls. Services import only from
//! `crate::domain` and `crate::application::ports`, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

pub mod cloud_cli;
pub mod credentials;
pub mod handoff;
pub mod packages;
pub mod privilege;
pub mod provision;
pub mod runtime;
pub mod sync;

use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::application::ports::ProgressReporter;
use crate::domain::Tolerated;

/// Report a tolerated failure as a warning and record it.
pub(crate) fn tolerate(
    reporter: &impl ProgressReporter,
    tolerated: &mut Vec<Tolerated>,
    item: Tolerated,
) {
    reporter.warn(&item.to_string());
    tolerated.push(item);
}

/// Collapse a runner result into "did the command succeed".
///
/// Spawn errors count as failure; they are logged for diagnostics only.
pub(crate) fn succeeded(result: Result<ExitStatus>, what: &str) -> bool {
    match result {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "{what} could not run");
            false
        }
    }
}

/// Human-readable failure detail: stderr, else stdout, else the exit status.
pub(crate) fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        return stdout.trim().to_string();
    }
    output.status.to_string()
}

/// Both output streams joined, for parsers that do not care which one a
/// tool writes to.
pub(crate) fn combined(output: &Output) -> String {
    format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
