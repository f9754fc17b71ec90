//! Application service: Node.js runtime ensure step.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, Downloader, ProgressReporter, ToolLocator};
use crate::application::services::packages::install_with_repair;
use crate::application::services::privilege::Privilege;
use crate::application::services::{succeeded, tolerate};
use crate::domain::packages::{CONFLICTING_RUNTIME_PACKAGES, RUNTIME_BINARIES, apt_remove_args};
use crate::domain::tooling::nodesource_setup_url;
use crate::domain::{ProvisionError, Tolerated};

/// Ensure `node` and `npm` from the vendor repository are installed.
///
/// # Errors
///
/// Returns [`ProvisionError::RuntimeSource`] if the vendor repository cannot
/// be added, and [`ProvisionError::RuntimeMissing`] if `npm` is still not on
/// `PATH` afterwards.
pub async fn ensure_runtime(
    runner: &impl CommandRunner,
    locator: &impl ToolLocator,
    downloader: &impl Downloader,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    major: u64,
    tolerated: &mut Vec<Tolerated>,
) -> Result<()> {
    let missing: Vec<&str> = RUNTIME_BINARIES
        .iter()
        .copied()
        .filter(|bin| !locator.is_available(bin))
        .collect();

    if missing.is_empty() {
        // A distro npm next to the vendor node breaks later upgrades.
        if dpkg_installed(runner, "npm").await {
            reporter.step("removing distro npm package, npm is reinstalled on the next run...");
            remove_packages(runner, reporter, privilege, &["npm"], tolerated).await;
            reporter.success("node installed, distro npm removed");
        } else {
            reporter.success("node and npm already installed");
        }
        return Ok(());
    }

    reporter.step(&format!(
        "{} missing, installing Node.js {major}.x...",
        missing.join(", ")
    ));

    let mut conflicting = Vec::new();
    for pkg in CONFLICTING_RUNTIME_PACKAGES {
        if dpkg_installed(runner, pkg).await {
            conflicting.push(*pkg);
        }
    }
    if !conflicting.is_empty() {
        reporter.step(&format!("removing distro {}...", conflicting.join(", ")));
        remove_packages(runner, reporter, privilege, &conflicting, tolerated).await;
    }

    if locator.is_available("apt-get") {
        add_vendor_source(runner, downloader, privilege, major).await?;
        install_with_repair(
            runner,
            reporter,
            privilege,
            &["nodejs".to_string()],
            tolerated,
        )
        .await?;
    } else {
        tolerate(reporter, tolerated, Tolerated::PackageManagerMissing);
    }

    if !locator.is_available("npm") {
        return Err(ProvisionError::RuntimeMissing {
            binary: "npm".to_string(),
            major,
        }
        .into());
    }
    reporter.success(&format!("Node.js {major}.x installed"));
    Ok(())
}

/// `dpkg -s <pkg>` exits 0 only for installed packages.
async fn dpkg_installed(runner: &impl CommandRunner, pkg: &str) -> bool {
    runner
        .run("dpkg", &["-s", pkg])
        .await
        .is_ok_and(|out| out.status.success())
}

async fn remove_packages(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    packages: &[&str],
    tolerated: &mut Vec<Tolerated>,
) {
    let args = apt_remove_args(packages);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let removed = succeeded(
        privilege.run_status(runner, "apt-get", &arg_refs).await,
        "apt-get remove",
    );
    if !removed {
        tolerate(
            reporter,
            tolerated,
            Tolerated::PackageRemovalFailed {
                packages: packages.join(" "),
            },
        );
    }
}

/// Download and run the NodeSource setup script, which adds the apt source
/// and signing key for the requested major version.
async fn add_vendor_source(
    runner: &impl CommandRunner,
    downloader: &impl Downloader,
    privilege: Privilege,
    major: u64,
) -> Result<()> {
    let url = nodesource_setup_url(major);
    let scratch = tempfile::tempdir().context("creating scratch dir for NodeSource setup")?;
    let script = scratch.path().join("nodesource_setup.sh");

    downloader
        .download(&url, &script)
        .await
        .map_err(|e| ProvisionError::RuntimeSource {
            url: url.clone(),
            detail: format!("{e:#}"),
        })?;

    let script_str = script.to_string_lossy();
    let ok = succeeded(
        privilege.run_status(runner, "bash", &[&script_str]).await,
        "NodeSource setup",
    );
    if !ok {
        return Err(ProvisionError::RuntimeSource {
            url,
            detail: "setup script exited with an error".to_string(),
        }
        .into());
    }
    Ok(())
}
