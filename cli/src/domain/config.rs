//! Domain types and validators for the bootstrap configuration.
//!
//! Pure functions only, no I/O.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::domain::error::{ConfigError, ProvisionError};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const OUTPUT_FORMAT: &str = "json";
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";
pub const DEFAULT_NODE_MAJOR: u64 = 20;
pub const AWS_CLI_MAJOR: u64 = 2;
pub const DEFAULT_SOURCE: &str = "s3://app-bootstrap/release/";
pub const DEFAULT_TARGET: &str = "/opt/app";
pub const DEFAULT_SUCCESSOR: &str = "start.sh";

// ── Credential inputs ────────────────────────────────────────────────────────

/// Raw `AWS_*` environment as read at startup.
///
/// Field names map to `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// `AWS_DEFAULT_REGION` when deserialised with `envy::prefixed("AWS_")`.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialEnv {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub default_region: Option<String>,
}

impl fmt::Debug for CredentialEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEnv")
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "<set>"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<set>"),
            )
            .field("default_region", &self.default_region)
            .finish()
    }
}

/// Resolved credentials: the four settings written to the AWS config store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub output: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("output", &self.output)
            .finish()
    }
}

/// The value as given, unless it is unset or only whitespace.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl Credentials {
    /// Resolve credentials from the raw environment.
    ///
    /// An unset or blank region falls back to [`DEFAULT_REGION`]; the output
    /// format is always [`OUTPUT_FORMAT`].
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::MissingCredential`] when the key id or the
    /// secret is unset or blank.
    pub fn resolve(env: &CredentialEnv) -> Result<Self, ProvisionError> {
        let access_key_id = non_empty(env.access_key_id.as_ref())
            .ok_or(ProvisionError::MissingCredential("AWS_ACCESS_KEY_ID"))?;
        let secret_access_key = non_empty(env.secret_access_key.as_ref())
            .ok_or(ProvisionError::MissingCredential("AWS_SECRET_ACCESS_KEY"))?;
        let region = non_empty(env.default_region.as_ref()).unwrap_or(DEFAULT_REGION);
        Ok(Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            region: region.to_string(),
            output: OUTPUT_FORMAT.to_string(),
        })
    }

    /// The `aws configure set` key/value pairs, in write order.
    #[must_use]
    pub fn settings(&self) -> [(&'static str, &str); 4] {
        [
            ("aws_access_key_id", self.access_key_id.as_str()),
            ("aws_secret_access_key", self.secret_access_key.as_str()),
            ("region", self.region.as_str()),
            ("output", self.output.as_str()),
        ]
    }

    /// Transient environment overrides for calls that must not rely on the
    /// persisted config store.
    #[must_use]
    pub fn env_overrides(&self) -> [(&'static str, &str); 3] {
        [
            ("AWS_ACCESS_KEY_ID", self.access_key_id.as_str()),
            ("AWS_SECRET_ACCESS_KEY", self.secret_access_key.as_str()),
            ("AWS_DEFAULT_REGION", self.region.as_str()),
        ]
    }
}

// ── Run configuration ────────────────────────────────────────────────────────

/// Every input of a provisioning run, passed explicitly to each step.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub timezone: String,
    pub node_major: u64,
    pub source: String,
    pub target: PathBuf,
    pub successor: PathBuf,
    /// Machine architecture, as in `std::env::consts::ARCH`.
    pub arch: String,
    pub credentials: CredentialEnv,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            node_major: DEFAULT_NODE_MAJOR,
            source: DEFAULT_SOURCE.to_string(),
            target: PathBuf::from(DEFAULT_TARGET),
            successor: PathBuf::from(DEFAULT_SUCCESSOR),
            arch: std::env::consts::ARCH.to_string(),
            credentials: CredentialEnv::default(),
        }
    }
}

impl BootstrapConfig {
    /// Absolute path of the start script looked up after the sync.
    #[must_use]
    pub fn successor_path(&self) -> PathBuf {
        self.target.join(&self.successor)
    }

    /// Environment applied to every child process and to the successor.
    #[must_use]
    pub fn process_env(&self) -> Vec<(String, String)> {
        vec![
            ("TZ".to_string(), self.timezone.clone()),
            ("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string()),
        ]
    }

    /// Validate command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_source(&self.source)?;
        if !self.target.is_absolute() {
            return Err(ConfigError::InvalidTarget(self.target.display().to_string()));
        }
        validate_successor(&self.successor)?;
        if self.node_major == 0 {
            return Err(ConfigError::InvalidNodeMajor(self.node_major));
        }
        Ok(())
    }
}

/// Validates the remote sync source.
///
/// # Errors
///
/// Returns an error unless `source` is an `s3://` URI with a bucket name.
pub fn validate_source(source: &str) -> Result<(), ConfigError> {
    match source.strip_prefix("s3://") {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidSource(source.to_string())),
    }
}

/// Validates the successor path relative to the sync target.
///
/// # Errors
///
/// Returns an error for empty, absolute, or parent-escaping paths.
pub fn validate_successor(successor: &Path) -> Result<(), ConfigError> {
    let escapes = successor
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if successor.as_os_str().is_empty() || escapes {
        return Err(ConfigError::InvalidSuccessor(
            successor.display().to_string(),
        ));
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
