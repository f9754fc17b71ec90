//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `std` and `anyhow`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::Result;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// There is deliberately no timeout: every call blocks until the child exits.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with extra environment variables layered on top of the
    /// runner's base environment, capturing its output.
    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Result<Output>;

    /// Run a program with inherited stdio and return only its exit status.
    /// Used for long installs whose progress the operator should see.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Host inspection ports ─────────────────────────────────────────────────────

/// Resolves command names on `PATH`.
pub trait ToolLocator {
    /// `true` when `tool` resolves to an executable.
    fn is_available(&self, tool: &str) -> bool;
}

/// Read-only filesystem queries.
pub trait LocalFs {
    /// `true` when `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// `true` when `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;
    /// Numeric `(uid, gid)` owning `path`, `None` if it cannot be read.
    fn owner(&self, path: &Path) -> Option<(u32, u32)>;
}

// ── Network ports ─────────────────────────────────────────────────────────────

/// Fetches a URL into a local file.
#[allow(async_fn_in_trait)]
pub trait Downloader {
    /// Download `url` to `dest`, replacing any existing file.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

// ── Credential Store Port ─────────────────────────────────────────────────────

/// Persistent AWS configuration (profile `default`).
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    /// Set `key` to `value`, overwriting any prior value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit a section header for a new step.
    fn section(&self, title: &str);
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
