//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Fatal conditions. Any of these aborts the whole run with a non-zero exit.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Package installation failed after repair and retry: {packages}")]
    PackageInstall { packages: String },

    #[error("'{binary}' is still not available after installing Node.js {major}.x")]
    RuntimeMissing { binary: String, major: u64 },

    #[error("Node.js package source setup failed ({url}): {detail}")]
    RuntimeSource { url: String, detail: String },

    #[error("'aws' is still not available after installing AWS CLI v{major}")]
    CliMissing { major: u64 },

    #[error("{0} is not set. Export it before starting the container.")]
    MissingCredential(&'static str),

    #[error("Cannot write AWS setting '{key}': {detail}")]
    CredentialWrite { key: String, detail: String },

    #[error("AWS credential check failed (sts get-caller-identity):\n{detail}")]
    CredentialVerification { detail: String },

    #[error("Cannot create sync directory {path}: {detail}")]
    SyncDirectory { path: String, detail: String },

    #[error("Sync from {source_uri} to {target} failed:\n{detail}")]
    Sync {
        source_uri: String,
        target: String,
        detail: String,
    },

    #[error("Handoff to {path} failed: {detail}")]
    Handoff { path: String, detail: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to command-line overrides of the fixed locations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid sync source '{0}': must be an s3:// URI")]
    InvalidSource(String),

    #[error("Invalid sync target '{0}': must be an absolute path")]
    InvalidTarget(String),

    #[error("Invalid successor '{0}': must be a relative path inside the sync target")]
    InvalidSuccessor(String),

    #[error("Invalid Node.js major version {0}")]
    InvalidNodeMajor(u64),
}
