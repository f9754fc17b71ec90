//! Infrastructure implementation of the `CredentialStore` port.
//!
//! Writes go through `aws configure set`, so the CLI decides where the
//! `credentials` and `config` files live (`AWS_SHARED_CREDENTIALS_FILE`,
//! `AWS_CONFIG_FILE`, or `~/.aws`).

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, CredentialStore};

/// `CredentialStore` backed by the AWS CLI, profile `default`.
pub struct AwsConfigureStore<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AwsConfigureStore<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> CredentialStore for AwsConfigureStore<R> {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let out = self
            .runner
            .run("aws", &["configure", "set", key, value])
            .await
            .context("failed to run aws configure set")?;
        anyhow::ensure!(
            out.status.success(),
            "aws configure set {key} exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
        Ok(())
    }
}
