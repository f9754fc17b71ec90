//! Download locations and version parsing for the Node.js and AWS CLI installs.

use semver::Version;

/// NodeSource setup script for the given major version.
#[must_use]
pub fn nodesource_setup_url(major: u64) -> String {
    format!("https://deb.nodesource.com/setup_{major}.x")
}

/// AWS CLI v2 installer archive for a `std::env::consts::ARCH` value.
///
/// Returns `None` for architectures AWS does not publish a Linux build for.
#[must_use]
pub fn aws_cli_archive_url(arch: &str) -> Option<String> {
    let suffix = match arch {
        "x86_64" => "x86_64",
        "aarch64" => "aarch64",
        _ => return None,
    };
    Some(format!(
        "https://awscli.amazonaws.com/awscli-exe-linux-{suffix}.zip"
    ))
}

/// Parse the version out of `aws --version` output.
///
/// The CLI prints e.g. `aws-cli/2.15.30 Python/3.11.8 Linux/6.5.0 exe/x86_64`.
/// v1 releases write the same line to stderr, so callers pass both streams.
#[must_use]
pub fn parse_aws_cli_version(output: &str) -> Option<Version> {
    let token = output
        .split_whitespace()
        .find_map(|t| t.strip_prefix("aws-cli/"))?;
    Version::parse(token)
        .ok()
        .or_else(|| lenient_version(token))
}

/// Accept `2.15` style versions that lack a patch component.
fn lenient_version(token: &str) -> Option<Version> {
    let mut parts = token.split('.').map(str::parse::<u64>);
    let major = parts.next()?.ok()?;
    let minor = parts.next().and_then(Result::ok).unwrap_or(0);
    Some(Version::new(major, minor, 0))
}

/// `true` when `output` reports the required major version.
#[must_use]
pub fn aws_cli_matches_major(output: &str, major: u64) -> bool {
    parse_aws_cli_version(output).is_some_and(|v| v.major == major)
}

/// `true` when an `aws/install --update` failure only means the CLI was
/// already there.
#[must_use]
pub fn is_preexisting_install(output: &str) -> bool {
    let lower = output.to_ascii_lowercase();
    lower.contains("found preexisting aws cli installation")
        || lower.contains("already exists")
}
