//! Test: local target with the background delivery endpoint

use crate::helpers::*;
use ota_deploy::core::config::DeployConfig;
use ota_deploy::{DeliveryFlavor, DeploymentTarget, ExecutionStatus};
use std::sync::Arc;

const IMAGE: &[u8] = b"\xE9\x03\x02\x20FIRMWARE-IMAGE-v2";

/// Build, stage and launch all succeed
#[tokio::test]
async fn test_local_server_pipeline_succeeds() {
    let project = tempfile::tempdir().unwrap();
    let config = DeployConfig::default();
    let runner = Arc::new(FakeRunner::building("build/mqtt_ssl.bin", IMAGE));
    let launcher = Arc::new(RecordingLauncher::default());

    let report = run_with_fakes(
        &config,
        project.path(),
        DeploymentTarget::Local,
        DeliveryFlavor::Server,
        runner.clone(),
        launcher.clone(),
    )
    .await;

    assert!(report.overall_succeeded);
    assert_eq!(report.status, ExecutionStatus::Completed);
    assert_eq!(report.target, DeploymentTarget::Local);
    assert_eq!(
        outcomes(&report),
        vec![
            ("Build".to_string(), true),
            ("Stage".to_string(), true),
            ("StartLocalDelivery".to_string(), true),
        ]
    );

    // The staged copy is byte-identical to the build output.
    let staged = project.path().join("firmware/esp32_ota_firmware.bin");
    assert_eq!(std::fs::read(staged).unwrap(), IMAGE);

    assert_eq!(runner.calls(), vec!["idf.py build"]);
    assert_eq!(
        launcher.launched(),
        vec![("python ota_server.py".to_string(), project.path().to_path_buf())]
    );
}

/// The endpoint cannot be started: the run fails at the last step
#[tokio::test]
async fn test_launch_fault_fails_last_step() {
    let project = tempfile::tempdir().unwrap();
    let config = DeployConfig::default();
    let runner = Arc::new(FakeRunner::building("build/mqtt_ssl.bin", IMAGE));
    let launcher = Arc::new(RecordingLauncher::failing());

    let report = run_with_fakes(
        &config,
        project.path(),
        DeploymentTarget::Local,
        DeliveryFlavor::Server,
        runner,
        launcher,
    )
    .await;

    assert!(!report.overall_succeeded);
    assert_eq!(report.step_outcomes.len(), 3);
    assert_eq!(report.failed_step().unwrap().name, "StartLocalDelivery");
    assert!(diagnostic_of(&report, "StartLocalDelivery").contains("Could not launch `python ota_server.py`"));

    // No rollback: the staged artifact stays on disk.
    assert!(project.path().join("firmware/esp32_ota_firmware.bin").exists());
}

/// A previously staged image is replaced by the new build
#[tokio::test]
async fn test_restaging_overwrites_previous_image() {
    let project = tempfile::tempdir().unwrap();
    let staged = project.path().join("firmware/esp32_ota_firmware.bin");
    std::fs::create_dir_all(staged.parent().unwrap()).unwrap();
    std::fs::write(&staged, b"stale image").unwrap();

    let report = run_with_fakes(
        &DeployConfig::default(),
        project.path(),
        DeploymentTarget::Local,
        DeliveryFlavor::Server,
        Arc::new(FakeRunner::building("build/mqtt_ssl.bin", IMAGE)),
        Arc::new(RecordingLauncher::default()),
    )
    .await;

    assert!(report.overall_succeeded);
    assert_eq!(std::fs::read(&staged).unwrap(), IMAGE);
}
