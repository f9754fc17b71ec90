//! Application service: base package ensure step.
//!
//! Installs only the missing tools (plus the fixed prerequisites) through
//! apt, with one `--fix-broken` repair and one retry before giving up.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter, ToolLocator};
use crate::application::services::privilege::Privilege;
use crate::application::services::{succeeded, tolerate};
use crate::domain::packages::{REQUIRED_TOOLS, apt_install_args};
use crate::domain::{PackagePlan, ProvisionError, Tolerated};

/// Ensure the required command-line tools are installed.
///
/// # Errors
///
/// Returns [`ProvisionError::PackageInstall`] if the install still fails
/// after the repair-and-retry cycle.
pub async fn ensure_packages(
    runner: &impl CommandRunner,
    locator: &impl ToolLocator,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    tolerated: &mut Vec<Tolerated>,
) -> Result<()> {
    let plan = PackagePlan::compute(REQUIRED_TOOLS, |tool| locator.is_available(tool));
    if plan.is_satisfied() {
        reporter.success(&format!("{} already installed", REQUIRED_TOOLS.join(", ")));
        return Ok(());
    }
    if !locator.is_available("apt-get") {
        tolerate(reporter, tolerated, Tolerated::PackageManagerMissing);
        return Ok(());
    }

    let packages = plan.install_set();
    reporter.step(&format!("installing {}...", packages.join(" ")));
    install_with_repair(runner, reporter, privilege, &packages, tolerated).await?;
    reporter.success(&format!("installed {}", plan.missing.join(", ")));
    Ok(())
}

/// `apt-get update && apt-get install`, then on failure one
/// `apt-get --fix-broken install` and one more attempt.
///
/// # Errors
///
/// Returns [`ProvisionError::PackageInstall`] when the second attempt fails.
pub async fn install_with_repair(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    packages: &[String],
    tolerated: &mut Vec<Tolerated>,
) -> Result<()> {
    if apt_install(runner, privilege, packages).await {
        return Ok(());
    }

    reporter.step("install failed, repairing package state...");
    let repaired = succeeded(
        privilege
            .run_status(runner, "apt-get", &["--fix-broken", "install", "-y"])
            .await,
        "apt-get --fix-broken install",
    );
    if !repaired {
        tolerate(reporter, tolerated, Tolerated::RepairFailed);
    }

    reporter.step("retrying install...");
    if apt_install(runner, privilege, packages).await {
        return Ok(());
    }
    Err(ProvisionError::PackageInstall {
        packages: packages.join(" "),
    }
    .into())
}

async fn apt_install(runner: &impl CommandRunner, privilege: Privilege, packages: &[String]) -> bool {
    let updated = succeeded(
        privilege.run_status(runner, "apt-get", &["update"]).await,
        "apt-get update",
    );
    if !updated {
        return false;
    }
    let args = apt_install_args(packages);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    succeeded(
        privilege.run_status(runner, "apt-get", &arg_refs).await,
        "apt-get install",
    )
}
