//! Unit tests for the Node.js runtime ensure step.

#![allow(clippy::expect_used)]

use bootstrap_cli::application::services::privilege::Privilege;
use bootstrap_cli::application::services::runtime::ensure_runtime;
use bootstrap_cli::domain::{ProvisionError, Tolerated};

use crate::helpers::{err_output, ok_output};
use crate::mocks::{FakeDownloader, FakeLocator, RecordingReporter, ScriptedRunner, ToolSet};

const SETUP_URL: &str = "https://deb.nodesource.com/setup_20.x";

#[tokio::test]
async fn test_present_runtime_without_distro_npm_is_untouched() {
    let tools = ToolSet::with(&["apt-get", "node", "npm"]);
    let runner = ScriptedRunner::new(&tools);
    let downloader = FakeDownloader::default();

    ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &downloader,
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut Vec::new(),
    )
    .await
    .expect("satisfied");

    assert_eq!(runner.lines(), vec!["dpkg -s npm".to_string()]);
    assert!(runner.mutating_calls().is_empty());
    assert!(downloader.urls().is_empty());
}

#[tokio::test]
async fn test_present_runtime_drops_distro_npm() {
    let tools = ToolSet::with(&["apt-get", "node", "npm"]);
    let runner = ScriptedRunner::new(&tools)
        .on("dpkg -s npm", ok_output(b"Status: install ok installed"))
        .installs("apt-get remove", &[]);

    ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &FakeDownloader::default(),
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut Vec::new(),
    )
    .await
    .expect("satisfied");

    assert!(runner.called("apt-get remove -y npm"));
    assert!(!runner.called("apt-get install"));
}

#[tokio::test]
async fn test_distro_npm_removal_is_reported_before_success() {
    let tools = ToolSet::with(&["apt-get", "node", "npm"]);
    let runner = ScriptedRunner::new(&tools)
        .on("dpkg -s npm", ok_output(b"Status: install ok installed"))
        .installs("apt-get remove", &[]);
    let reporter = RecordingReporter::default();

    ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &FakeDownloader::default(),
        &reporter,
        Privilege::direct(),
        20,
        &mut Vec::new(),
    )
    .await
    .expect("satisfied");

    let events = reporter.events();
    let removal = events
        .iter()
        .position(|e| e.starts_with("step: removing distro npm"))
        .expect("removal step");
    let success = events
        .iter()
        .position(|e| e.starts_with("success: "))
        .expect("success event");
    assert!(removal < success, "got: {events:?}");
    assert!(events.iter().all(|e| e != "success: node and npm already installed"));
}

#[tokio::test]
async fn test_missing_runtime_installs_from_vendor_source() {
    let tools = ToolSet::with(&["apt-get"]);
    let runner = ScriptedRunner::new(&tools)
        .on("dpkg -s nodejs", ok_output(b"Status: install ok installed"))
        .installs("apt-get remove", &[])
        .installs("bash ", &[])
        .installs("apt-get update", &[])
        .installs("apt-get install", &["node", "npm"]);
    let downloader = FakeDownloader::default();
    let mut tolerated = Vec::new();

    ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &downloader,
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut tolerated,
    )
    .await
    .expect("installed");

    assert_eq!(downloader.urls(), vec![SETUP_URL.to_string()]);
    let lines = runner.lines();
    let pos = |pattern: &str| {
        lines
            .iter()
            .position(|l| l.contains(pattern))
            .unwrap_or_else(|| panic!("no call matching {pattern}: {lines:?}"))
    };
    assert!(pos("apt-get remove -y nodejs") < pos("bash "));
    assert!(pos("bash ") < pos("apt-get install"));
    assert!(runner.called("apt-get install -y --no-install-recommends nodejs"));
    assert!(
        runner
            .find("bash ")
            .expect("setup script")
            .line
            .ends_with("nodesource_setup.sh")
    );
    assert!(tolerated.is_empty());
}

#[tokio::test]
async fn test_unreachable_vendor_source_is_fatal() {
    let tools = ToolSet::with(&["apt-get"]);
    let runner = ScriptedRunner::new(&tools);

    let err = ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &FakeDownloader::failing(),
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut Vec::new(),
    )
    .await
    .expect_err("must fail");

    match err.downcast_ref::<ProvisionError>() {
        Some(ProvisionError::RuntimeSource { url, .. }) => assert_eq!(url, SETUP_URL),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!runner.called("bash "));
    assert!(!runner.called("apt-get install"));
}

#[tokio::test]
async fn test_failing_setup_script_is_fatal() {
    let tools = ToolSet::with(&["apt-get"]);
    let runner = ScriptedRunner::new(&tools).on("bash ", err_output(1, b"gpg: no valid OpenPGP data"));

    let err = ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &FakeDownloader::default(),
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut Vec::new(),
    )
    .await
    .expect_err("must fail");

    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::RuntimeSource { .. })
    ));
}

#[tokio::test]
async fn test_npm_still_missing_after_install_is_fatal() {
    let tools = ToolSet::with(&["apt-get"]);
    let runner = ScriptedRunner::new(&tools)
        .installs("bash ", &[])
        .installs("apt-get update", &[])
        .installs("apt-get install", &["node"]);

    let err = ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &FakeDownloader::default(),
        &RecordingReporter::default(),
        Privilege::direct(),
        18,
        &mut Vec::new(),
    )
    .await
    .expect_err("must fail");

    match err.downcast_ref::<ProvisionError>() {
        Some(ProvisionError::RuntimeMissing { binary, major }) => {
            assert_eq!(binary, "npm");
            assert_eq!(*major, 18);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_removal_is_tolerated() {
    let tools = ToolSet::with(&["apt-get"]);
    let runner = ScriptedRunner::new(&tools)
        .on("dpkg -s npm", ok_output(b""))
        .on("apt-get remove", err_output(100, b"dpkg lock held"))
        .installs("bash ", &[])
        .installs("apt-get update", &[])
        .installs("apt-get install", &["node", "npm"]);
    let mut tolerated = Vec::new();

    ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &FakeDownloader::default(),
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut tolerated,
    )
    .await
    .expect("installed");

    assert_eq!(
        tolerated,
        vec![Tolerated::PackageRemovalFailed {
            packages: "npm".to_string()
        }]
    );
}

#[tokio::test]
async fn test_missing_apt_get_without_npm_is_fatal() {
    let tools = ToolSet::with(&["node"]);
    let runner = ScriptedRunner::new(&tools);
    let downloader = FakeDownloader::default();
    let mut tolerated = Vec::new();

    let err = ensure_runtime(
        &runner,
        &FakeLocator::new(&tools),
        &downloader,
        &RecordingReporter::default(),
        Privilege::direct(),
        20,
        &mut tolerated,
    )
    .await
    .expect_err("npm cannot appear");

    assert_eq!(tolerated, vec![Tolerated::PackageManagerMissing]);
    assert!(downloader.urls().is_empty());
    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::RuntimeMissing { .. })
    ));
}
