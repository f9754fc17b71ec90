//! Application service: decide between handing off and parking.

use crate::application::ports::{LocalFs, ProgressReporter};
use crate::domain::{BootstrapConfig, ProvisionOutcome, Step};

/// Interpreter used for the start script. Objects synced from S3 carry no
/// executable bit, so the script is never executed directly.
pub const SUCCESSOR_INTERPRETER: &str = "bash";

/// Look for the start script under the sync target.
///
/// Nothing is reported on the handoff path: the next output the operator
/// sees comes from the successor itself.
pub fn resolve_handoff(
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    config: &BootstrapConfig,
) -> ProvisionOutcome {
    let path = config.successor_path();
    if fs.is_file(&path) {
        return ProvisionOutcome::Handoff {
            program: SUCCESSOR_INTERPRETER.to_string(),
            args: vec![path.display().to_string()],
            cwd: config.target.clone(),
        };
    }
    reporter.section(&Step::Handoff.header());
    reporter.warn(&format!(
        "{} not found, keeping the container alive for inspection",
        path.display()
    ));
    ProvisionOutcome::Parked { expected: path }
}
