//! Application service: AWS credential configuration and verification.

use anyhow::Result;
use serde::Deserialize;

use crate::application::ports::{CommandRunner, CredentialStore, ProgressReporter};
use crate::application::services::diagnostic;
use crate::domain::{Credentials, ProvisionError};

/// Subset of `aws sts get-caller-identity` output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
}

/// Write the four settings of the default profile, overwriting prior values.
///
/// # Errors
///
/// Returns [`ProvisionError::CredentialWrite`] for the first failed write.
pub async fn configure_credentials(
    store: &impl CredentialStore,
    reporter: &impl ProgressReporter,
    credentials: &Credentials,
) -> Result<()> {
    for (key, value) in credentials.settings() {
        store
            .set(key, value)
            .await
            .map_err(|e| ProvisionError::CredentialWrite {
                key: key.to_string(),
                detail: format!("{e:#}"),
            })?;
    }
    reporter.success(&format!(
        "default profile written (region {}, output {})",
        credentials.region, credentials.output
    ));
    Ok(())
}

/// Check the stored credentials with a read-only authenticated call.
///
/// Returns the caller identity when the CLI output can be parsed.
///
/// # Errors
///
/// Returns [`ProvisionError::CredentialVerification`] on any failure. There
/// is no retry; the container platform restarts the whole run.
pub async fn verify_credentials(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
) -> Result<Option<CallerIdentity>> {
    let out = runner
        .run("aws", &["sts", "get-caller-identity", "--output", "json"])
        .await
        .map_err(|e| ProvisionError::CredentialVerification {
            detail: format!("{e:#}"),
        })?;
    if !out.status.success() {
        return Err(ProvisionError::CredentialVerification {
            detail: diagnostic(&out),
        }
        .into());
    }

    let identity = serde_json::from_slice::<CallerIdentity>(&out.stdout).ok();
    match &identity {
        Some(id) => reporter.success(&format!("authenticated as {} ({})", id.arn, id.account)),
        None => reporter.success("credentials accepted"),
    }
    Ok(identity)
}
