//! Shared test helpers: exit-status and output constructors, plus a ready
//! made run configuration.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use bootstrap_cli::domain::{BootstrapConfig, CredentialEnv};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Configuration ────────────────────────────────────────────────────────────

pub const ACCESS_KEY: &str = "AKIAEXAMPLE";
pub const SECRET_KEY: &str = "wJalrXUtnFEMI/EXAMPLEKEY";

pub fn credential_env(region: Option<&str>) -> CredentialEnv {
    CredentialEnv {
        access_key_id: Some(ACCESS_KEY.to_string()),
        secret_access_key: Some(SECRET_KEY.to_string()),
        default_region: region.map(str::to_string),
    }
}

/// Default locations, fixed architecture and a complete credential set.
pub fn test_config() -> BootstrapConfig {
    BootstrapConfig {
        arch: "x86_64".to_string(),
        credentials: credential_env(Some("us-east-1")),
        ..BootstrapConfig::default()
    }
}

pub fn start_script() -> PathBuf {
    test_config().successor_path()
}

pub const IDENTITY_JSON: &[u8] = br#"{
    "UserId": "AIDAEXAMPLE",
    "Account": "123456789012",
    "Arn": "arn:aws:iam::123456789012:user/deploy"
}"#;

pub const AWS_V2_VERSION: &[u8] = b"aws-cli/2.15.30 Python/3.11.8 Linux/6.5.0 exe/x86_64.ubuntu.22\n";
