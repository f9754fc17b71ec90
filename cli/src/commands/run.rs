//! `bootstrap run`: provision the container, then hand off or park.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::{Adapters, AppContext};
use crate::application::services::provision::provision;
use crate::domain::config::{
    DEFAULT_NODE_MAJOR, DEFAULT_SOURCE, DEFAULT_SUCCESSOR, DEFAULT_TARGET, DEFAULT_TIMEZONE,
};
use crate::domain::{BootstrapConfig, CredentialEnv, ProvisionError, ProvisionOutcome};
use crate::infra::env::load_credential_env;
use crate::infra::handoff::{exec_successor, park};

/// Arguments for the run command.
///
/// Credentials come from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// `AWS_DEFAULT_REGION`; the locations below are fixed unless overridden
/// on the command line.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Timezone exported to every child process
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Node.js major version to install when node/npm are missing
    #[arg(long, default_value_t = DEFAULT_NODE_MAJOR)]
    pub node_major: u64,

    /// S3 prefix to sync from
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Local directory to sync into
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: PathBuf,

    /// Start script, relative to the target directory
    #[arg(long, default_value = DEFAULT_SUCCESSOR)]
    pub successor: PathBuf,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            node_major: DEFAULT_NODE_MAJOR,
            source: DEFAULT_SOURCE.to_string(),
            target: PathBuf::from(DEFAULT_TARGET),
            successor: PathBuf::from(DEFAULT_SUCCESSOR),
        }
    }
}

impl RunArgs {
    /// Combine flags and credential environment into a validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if any override is invalid.
    pub fn into_config(self, credentials: CredentialEnv) -> Result<BootstrapConfig> {
        let config = BootstrapConfig {
            timezone: self.timezone,
            node_major: self.node_major,
            source: self.source,
            target: self.target,
            successor: self.successor,
            credentials,
            ..BootstrapConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Run `bootstrap run`.
///
/// Never returns `Ok` on the handoff path: the process is replaced. On the
/// parked path it returns once the container is asked to stop.
///
/// # Errors
///
/// Returns the first fatal provisioning error, or the handoff failure.
pub async fn run(app: &AppContext, args: RunArgs) -> Result<()> {
    let config = args.into_config(load_credential_env()?)?;
    let adapters = Adapters::for_config(&config);
    let reporter = app.terminal_reporter();

    app.output.kv("source", &config.source);
    app.output.kv("target", &config.target.display().to_string());

    let report = provision(&adapters.host(), &reporter, &config).await?;
    tracing::debug!(tolerated = report.tolerated.len(), "provisioning finished");

    match report.outcome {
        ProvisionOutcome::Handoff { program, args, cwd } => {
            let err = exec_successor(&program, &args, &cwd, &config.process_env());
            Err(ProvisionError::Handoff {
                path: config.successor_path().display().to_string(),
                detail: format!("{err:#}"),
            }
            .into())
        }
        ProvisionOutcome::Parked { .. } => park().await,
    }
}
