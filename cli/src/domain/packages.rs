//! Package planning: which tools are missing and what to ask apt for.
//!
//! Pure functions only. Presence is supplied by the caller as a predicate so
//! the planner never touches `PATH` itself.

/// Command-line tools every container needs. Each tool ships in the package
/// of the same name.
pub const REQUIRED_TOOLS: &[&str] = &["curl", "unzip", "tmux"];

/// Packages appended to every install, whatever is missing.
pub const PREREQUISITES: &[&str] = &["ca-certificates", "gnupg"];

/// Distro packages that conflict with the vendor Node.js build.
pub const CONFLICTING_RUNTIME_PACKAGES: &[&str] = &["nodejs", "npm"];

/// Binaries that must resolve for the JS runtime to count as installed.
pub const RUNTIME_BINARIES: &[&str] = &["node", "npm"];

/// Result of comparing the required tools against what is on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePlan {
    /// Missing tools, in the order they were required.
    pub missing: Vec<String>,
}

impl PackagePlan {
    /// Compute the plan for `required` given a presence predicate.
    pub fn compute(required: &[&str], is_present: impl Fn(&str) -> bool) -> Self {
        let mut missing: Vec<String> = Vec::new();
        for tool in required {
            if !is_present(tool) && !missing.iter().any(|m| m == tool) {
                missing.push((*tool).to_string());
            }
        }
        Self { missing }
    }

    /// `true` when nothing needs installing.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// Packages passed to `apt-get install`: the missing tools followed by
    /// the prerequisites, without duplicates. Empty when satisfied.
    #[must_use]
    pub fn install_set(&self) -> Vec<String> {
        if self.is_satisfied() {
            return Vec::new();
        }
        let mut set = self.missing.clone();
        for pkg in PREREQUISITES {
            if !set.iter().any(|p| p == pkg) {
                set.push((*pkg).to_string());
            }
        }
        set
    }
}

/// Arguments for `apt-get install` of `packages`.
#[must_use]
pub fn apt_install_args(packages: &[String]) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        "-y".to_string(),
        "--no-install-recommends".to_string(),
    ];
    args.extend(packages.iter().cloned());
    args
}

/// Arguments for `apt-get remove` of `packages`.
#[must_use]
pub fn apt_remove_args(packages: &[&str]) -> Vec<String> {
    let mut args = vec!["remove".to_string(), "-y".to_string()];
    args.extend(packages.iter().map(|p| (*p).to_string()));
    args
}
