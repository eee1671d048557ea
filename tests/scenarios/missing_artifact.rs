//! Test: build output missing or build failing

use crate::helpers::*;
use ota_deploy::core::config::DeployConfig;
use ota_deploy::process::CommandResult;
use ota_deploy::{DeliveryFlavor, DeploymentTarget, ExecutionStatus};
use std::sync::Arc;

/// Build succeeds but writes the binary under a different name
#[tokio::test]
async fn test_missing_artifact_stops_before_delivery() {
    let project = tempfile::tempdir().unwrap();
    let config = DeployConfig::default();
    let runner = Arc::new(FakeRunner::building("build/esp32_ota_example.bin", b"image"));
    let launcher = Arc::new(RecordingLauncher::default());

    let report = run_with_fakes(
        &config,
        project.path(),
        DeploymentTarget::Local,
        DeliveryFlavor::Server,
        runner,
        launcher.clone(),
    )
    .await;

    assert!(!report.overall_succeeded);
    assert_eq!(report.status, ExecutionStatus::Failed);
    assert_eq!(
        outcomes(&report),
        vec![("Build".to_string(), true), ("Stage".to_string(), false)]
    );

    // The expected path is part of the diagnostic.
    let expected = project.path().join("build/mqtt_ssl.bin");
    assert!(diagnostic_of(&report, "Stage").contains(&expected.display().to_string()));

    assert!(launcher.launched().is_empty());
    assert!(!project.path().join("firmware/esp32_ota_firmware.bin").exists());
}

/// Nonzero build exit halts the run after one step
#[tokio::test]
async fn test_build_failure_halts_immediately() {
    let project = tempfile::tempdir().unwrap();
    let runner = Arc::new(FakeRunner::new(|_, _| {
        CommandResult::completed(2, "", "region `iram0_0_seg' overflowed by 312 bytes")
    }));
    let launcher = Arc::new(RecordingLauncher::default());

    let report = run_with_fakes(
        &DeployConfig::default(),
        project.path(),
        DeploymentTarget::Cloud,
        DeliveryFlavor::Server,
        runner.clone(),
        launcher,
    )
    .await;

    assert_eq!(outcomes(&report), vec![("Build".to_string(), false)]);
    assert!(diagnostic_of(&report, "Build").contains("overflowed by 312 bytes"));
    assert_eq!(runner.calls(), vec!["idf.py build"]);
}
