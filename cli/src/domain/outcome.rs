//! Outcome of a provisioning run and the soft failures it tolerated.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that are reported as warnings and never abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Tolerated {
    #[error("apt-get not found, assuming required packages are provided another way")]
    PackageManagerMissing,

    #[error("apt-get --fix-broken install failed, retrying the install anyway")]
    RepairFailed,

    #[error("could not remove conflicting packages ({packages}), continuing")]
    PackageRemovalFailed { packages: String },

    #[error("AWS CLI installer reported an existing installation, keeping it")]
    CliAlreadyPresent,

    #[error("could not change ownership of {path}, continuing")]
    OwnershipFixFailed { path: String },

    #[error("not running as root and sudo is unavailable, privileged commands run unprefixed")]
    NoPrivilegeEscalation,
}

/// How the run ends once every step has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Replace the current process with `program args...` run from `cwd`.
    Handoff {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
    },
    /// No successor was found: stay resident to keep the container alive.
    Parked { expected: PathBuf },
}

/// Final report of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: ProvisionOutcome,
    pub tolerated: Vec<Tolerated>,
}
