//! Application service: S3 prefix to local directory sync.
//!
//! The sync is additive: files removed remotely stay on disk.

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::application::services::privilege::{Privilege, current_ids};
use crate::application::services::{diagnostic, tolerate};
use crate::domain::{BootstrapConfig, Credentials, ProvisionError, Tolerated};

/// Prepare the target directory and sync the remote prefix into it.
///
/// # Errors
///
/// Returns [`ProvisionError::SyncDirectory`] if the directory cannot be
/// created and [`ProvisionError::Sync`] if `aws s3 sync` fails.
pub async fn sync_objects(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    config: &BootstrapConfig,
    credentials: &Credentials,
    tolerated: &mut Vec<Tolerated>,
) -> Result<()> {
    let target = config.target.display().to_string();

    if !fs.is_dir(&config.target) {
        reporter.step(&format!("creating {target}..."));
        let out = privilege
            .run(runner, "mkdir", &["-p", &target])
            .await
            .map_err(|e| ProvisionError::SyncDirectory {
                path: target.clone(),
                detail: format!("{e:#}"),
            })?;
        if !out.status.success() {
            return Err(ProvisionError::SyncDirectory {
                path: target,
                detail: diagnostic(&out),
            }
            .into());
        }
    }

    ensure_owned(runner, fs, reporter, privilege, config, tolerated).await;

    reporter.step(&format!("syncing {} to {target}...", config.source));
    let out = runner
        .run_with_env(
            "aws",
            &["s3", "sync", &config.source, &target, "--only-show-errors"],
            &credentials.env_overrides(),
        )
        .await
        .map_err(|e| ProvisionError::Sync {
            source_uri: config.source.clone(),
            target: target.clone(),
            detail: format!("{e:#}"),
        })?;
    if !out.status.success() {
        return Err(ProvisionError::Sync {
            source_uri: config.source.clone(),
            target,
            detail: diagnostic(&out),
        }
        .into());
    }
    reporter.success(&format!("{target} is up to date"));
    Ok(())
}

/// Hand the target directory to the invoking user. Failures are tolerated.
async fn ensure_owned(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    privilege: Privilege,
    config: &BootstrapConfig,
    tolerated: &mut Vec<Tolerated>,
) {
    let target = config.target.display().to_string();
    let Some(ids) = current_ids(runner).await else {
        tolerate(reporter, tolerated, Tolerated::OwnershipFixFailed { path: target });
        return;
    };
    if fs.owner(&config.target) == Some((ids.uid, ids.gid)) {
        return;
    }

    let owner = format!("{}:{}", ids.uid, ids.gid);
    let changed = privilege
        .run(runner, "chown", &["-R", &owner, &target])
        .await
        .is_ok_and(|out| out.status.success());
    if !changed {
        tolerate(reporter, tolerated, Tolerated::OwnershipFixFailed { path: target });
    }
}
