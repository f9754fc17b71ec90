//! The fixed, linear sequence of provisioning steps.

/// One stage of the run. Steps execute in [`Step::ORDER`] and never loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnvSetup,
    PackageEnsure,
    RuntimeEnsure,
    CliEnsure,
    CredentialConfigure,
    CredentialVerify,
    Sync,
    Handoff,
}

impl Step {
    pub const ORDER: [Step; 8] = [
        Step::EnvSetup,
        Step::PackageEnsure,
        Step::RuntimeEnsure,
        Step::CliEnsure,
        Step::CredentialConfigure,
        Step::CredentialVerify,
        Step::Sync,
        Step::Handoff,
    ];

    /// Section header printed when the step starts.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Step::EnvSetup => "Environment",
            Step::PackageEnsure => "System packages",
            Step::RuntimeEnsure => "Node.js",
            Step::CliEnsure => "AWS CLI",
            Step::CredentialConfigure => "AWS credentials",
            Step::CredentialVerify => "AWS identity",
            Step::Sync => "S3 sync",
            Step::Handoff => "Start",
        }
    }

    /// 1-based position, used in headers like `[3/8]`.
    #[must_use]
    pub fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i + 1)
    }

    /// Header line for the step, e.g. `[2/8] System packages`.
    #[must_use]
    pub fn header(self) -> String {
        format!("[{}/{}] {}", self.position(), Self::ORDER.len(), self.title())
    }
}
