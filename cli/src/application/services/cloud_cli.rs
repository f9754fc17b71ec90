//! Application service: AWS CLI v2 ensure step.
//!
//! The installer archive is unpacked into a scratch directory that is removed
//! when the step returns, whether it succeeded or not.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, Downloader, ProgressReporter, ToolLocator};
use crate::application::services::privilege::Privilege;
use crate::application::services::{combined, diagnostic, tolerate};
use crate::domain::config::AWS_CLI_MAJOR;
use crate::domain::tooling::{aws_cli_archive_url, aws_cli_matches_major, is_preexisting_install};
use crate::domain::{ProvisionError, Tolerated};

/// Ensure `aws` is on `PATH` and reports major version [`AWS_CLI_MAJOR`].
///
/// # Errors
///
/// Returns an error if the download, unpack, or installer fails, and
/// [`ProvisionError::CliMissing`] if `aws` is still absent afterwards.
pub async fn ensure_cloud_cli(
    runner: &impl CommandRunner,
    locator: &impl ToolLocator,
    downloader: &impl Downloader,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    arch: &str,
    tolerated: &mut Vec<Tolerated>,
) -> Result<()> {
    if is_satisfied(runner, locator).await {
        reporter.success(&format!("aws-cli v{AWS_CLI_MAJOR} already installed"));
        return Ok(());
    }

    let url = aws_cli_archive_url(arch)
        .ok_or_else(|| anyhow::anyhow!("no AWS CLI v{AWS_CLI_MAJOR} build for {arch}"))?;
    reporter.step(&format!("installing AWS CLI v{AWS_CLI_MAJOR}..."));

    let scratch = tempfile::Builder::new()
        .prefix("awscli-")
        .tempdir()
        .context("creating scratch dir for AWS CLI installer")?;
    install_from_archive(
        runner,
        downloader,
        reporter,
        privilege,
        &url,
        scratch.path(),
        tolerated,
    )
    .await?;
    drop(scratch);

    if !locator.is_available("aws") {
        return Err(ProvisionError::CliMissing {
            major: AWS_CLI_MAJOR,
        }
        .into());
    }
    reporter.success(&format!("aws-cli v{AWS_CLI_MAJOR} installed"));
    Ok(())
}

async fn is_satisfied(runner: &impl CommandRunner, locator: &impl ToolLocator) -> bool {
    if !locator.is_available("aws") {
        return false;
    }
    match runner.run("aws", &["--version"]).await {
        Ok(out) if out.status.success() => aws_cli_matches_major(&combined(&out), AWS_CLI_MAJOR),
        _ => false,
    }
}

async fn install_from_archive(
    runner: &impl CommandRunner,
    downloader: &impl Downloader,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    url: &str,
    scratch: &Path,
    tolerated: &mut Vec<Tolerated>,
) -> Result<()> {
    let archive = scratch.join("awscliv2.zip");
    downloader
        .download(url, &archive)
        .await
        .with_context(|| format!("downloading {url}"))?;

    let archive_str = archive.to_string_lossy();
    let scratch_str = scratch.to_string_lossy();
    let unzip = runner
        .run("unzip", &["-q", "-o", &archive_str, "-d", &scratch_str])
        .await
        .context("unpacking AWS CLI installer")?;
    anyhow::ensure!(
        unzip.status.success(),
        "unpacking AWS CLI installer failed: {}",
        diagnostic(&unzip)
    );

    let installer = scratch.join("aws").join("install");
    let installer_str = installer.to_string_lossy();
    let install = privilege
        .run(runner, &installer_str, &["--update"])
        .await
        .context("running AWS CLI installer")?;
    if !install.status.success() {
        if is_preexisting_install(&combined(&install)) {
            tolerate(reporter, tolerated, Tolerated::CliAlreadyPresent);
        } else {
            anyhow::bail!("AWS CLI installer failed: {}", diagnostic(&install));
        }
    }
    Ok(())
}
