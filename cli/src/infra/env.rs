//! Reads the `AWS_*` credential environment with `envy`.

use anyhow::{Context, Result};

use crate::domain::CredentialEnv;

const PREFIX: &str = "AWS_";

/// Load `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_DEFAULT_REGION`
/// from the process environment. Unset variables become `None`.
///
/// # Errors
///
/// Returns an error if a variable holds a value `envy` cannot decode.
pub fn load_credential_env() -> Result<CredentialEnv> {
    credential_env_from(std::env::vars())
}

/// Same as [`load_credential_env`] over an explicit set of variables.
///
/// # Errors
///
/// Returns an error if a variable holds a value `envy` cannot decode.
pub fn credential_env_from<I>(vars: I) -> Result<CredentialEnv>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed(PREFIX)
        .from_iter(vars)
        .context("failed to read AWS_* environment variables")
}
