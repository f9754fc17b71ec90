//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod outcome;
pub mod packages;
pub mod step;
pub mod tooling;

pub use config::{BootstrapConfig, CredentialEnv, Credentials};
pub use error::{ConfigError, ProvisionError};
pub use outcome::{ProvisionOutcome, Report, Tolerated};
pub use packages::PackagePlan;
pub use step::Step;
