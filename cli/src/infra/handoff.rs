//! Process replacement and the parked keep-alive state.

use std::path::Path;

use anyhow::{Context, Result};

/// Replace the current process image with `program args...`.
///
/// Only returns when the replacement failed; the returned error describes
/// why.
#[cfg(unix)]
#[must_use]
pub fn exec_successor(
    program: &str,
    args: &[String],
    cwd: &Path,
    env: &[(String, String)],
) -> anyhow::Error {
    use std::os::unix::process::CommandExt;

    let err = std::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .exec();
    anyhow::Error::new(err).context(format!("exec {program}"))
}

#[cfg(not(unix))]
#[must_use]
pub fn exec_successor(
    program: &str,
    _args: &[String],
    _cwd: &Path,
    _env: &[(String, String)],
) -> anyhow::Error {
    anyhow::anyhow!("exec {program}: process replacement requires a Unix host")
}

/// Block until the container is asked to stop (SIGTERM or SIGINT).
///
/// # Errors
///
/// Returns an error if the signal handlers cannot be installed.
pub async fn park() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term =
            signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
        tokio::select! {
            _ = term.recv() => {}
            res = tokio::signal::ctrl_c() => res.context("failed to install Ctrl-C handler")?,
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .context("failed to install Ctrl-C handler")?;

    tracing::debug!("parked process received shutdown signal");
    Ok(())
}
