//! Application service: the full provisioning run.
//!
//! Steps run strictly in [`Step::ORDER`]. Each one succeeds, is skipped
//! because it is already satisfied, or aborts the run by returning an error.

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, CredentialStore, Downloader, LocalFs, ProgressReporter, ToolLocator,
};
use crate::application::services::cloud_cli::ensure_cloud_cli;
use crate::application::services::credentials::{configure_credentials, verify_credentials};
use crate::application::services::handoff::resolve_handoff;
use crate::application::services::packages::ensure_packages;
use crate::application::services::privilege;
use crate::application::services::runtime::ensure_runtime;
use crate::application::services::sync::sync_objects;
use crate::domain::{BootstrapConfig, Credentials, Report, Step};

/// The host adapters a run talks to.
pub struct Host<'a, R, L, F, D, S> {
    pub runner: &'a R,
    pub locator: &'a L,
    pub fs: &'a F,
    pub downloader: &'a D,
    pub store: &'a S,
}

/// Run every provisioning step and return how the run should end.
///
/// # Errors
///
/// Returns the first fatal error; later steps are never attempted.
pub async fn provision<R, L, F, D, S>(
    host: &Host<'_, R, L, F, D, S>,
    reporter: &impl ProgressReporter,
    config: &BootstrapConfig,
) -> Result<Report>
where
    R: CommandRunner,
    L: ToolLocator,
    F: LocalFs,
    D: Downloader,
    S: CredentialStore,
{
    let mut tolerated = Vec::new();

    reporter.section(&Step::EnvSetup.header());
    reporter.step(&format!(
        "TZ={} DEBIAN_FRONTEND=noninteractive",
        config.timezone
    ));
    let privilege = privilege::detect(host.runner, host.locator, reporter, &mut tolerated).await;

    reporter.section(&Step::PackageEnsure.header());
    ensure_packages(host.runner, host.locator, reporter, privilege, &mut tolerated).await?;

    reporter.section(&Step::RuntimeEnsure.header());
    ensure_runtime(
        host.runner,
        host.locator,
        host.downloader,
        reporter,
        privilege,
        config.node_major,
        &mut tolerated,
    )
    .await?;

    reporter.section(&Step::CliEnsure.header());
    ensure_cloud_cli(
        host.runner,
        host.locator,
        host.downloader,
        reporter,
        privilege,
        &config.arch,
        &mut tolerated,
    )
    .await?;

    reporter.section(&Step::CredentialConfigure.header());
    let credentials = Credentials::resolve(&config.credentials)?;
    configure_credentials(host.store, reporter, &credentials).await?;

    reporter.section(&Step::CredentialVerify.header());
    verify_credentials(host.runner, reporter).await?;

    reporter.section(&Step::Sync.header());
    sync_objects(
        host.runner,
        host.fs,
        reporter,
        privilege,
        config,
        &credentials,
        &mut tolerated,
    )
    .await?;

    let outcome = resolve_handoff(host.fs, reporter, config);
    Ok(Report {
        outcome,
        tolerated,
    })
}
