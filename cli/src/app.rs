//! Application context: unified state passed to every command handler.
//!
//! `AppContext` carries the presentation state built from global flags.
//! `Adapters` bundles the production infrastructure for one provisioning run;
//! it is built per run because the child-process environment depends on the
//! run's configuration.

use crate::application::services::provision::Host;
use crate::domain::BootstrapConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::credential_store::AwsConfigureStore;
use crate::infra::download::HttpDownloader;
use crate::infra::fs::{HostFs, PathLocator};
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
        }
    }

    /// Progress reporter writing to this context's terminal.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

/// Production adapters for a provisioning run.
pub struct Adapters {
    pub runner: TokioCommandRunner,
    pub locator: PathLocator,
    pub fs: HostFs,
    pub downloader: HttpDownloader,
    pub store: AwsConfigureStore<TokioCommandRunner>,
}

impl Adapters {
    /// Build adapters whose child processes inherit `config.process_env()`.
    #[must_use]
    pub fn for_config(config: &BootstrapConfig) -> Self {
        let runner = TokioCommandRunner::new(config.process_env());
        Self {
            store: AwsConfigureStore::new(runner.clone()),
            runner,
            locator: PathLocator,
            fs: HostFs,
            downloader: HttpDownloader,
        }
    }

    /// Borrow the adapters as the `Host` the provisioning service expects.
    #[must_use]
    pub fn host(
        &self,
    ) -> Host<
        '_,
        TokioCommandRunner,
        PathLocator,
        HostFs,
        HttpDownloader,
        AwsConfigureStore<TokioCommandRunner>,
    > {
        Host {
            runner: &self.runner,
            locator: &self.locator,
            fs: &self.fs,
            downloader: &self.downloader,
            store: &self.store,
        }
    }
}
