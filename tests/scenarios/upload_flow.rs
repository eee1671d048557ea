//! Test: multipart upload to the delivery endpoint

use crate::helpers::*;
use ota_deploy::core::config::DeployConfig;
use ota_deploy::{DeliveryError, DeliveryFlavor, DeploymentTarget};
use std::sync::Arc;

const IMAGE: &[u8] = b"FIRMWARE-IMAGE-v2";

fn staged_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("esp32_ota_firmware.bin");
    std::fs::write(&path, IMAGE).unwrap();
    path
}

/// HTTP 200 is success and the request carries the firmware field
#[tokio::test]
async fn test_upload_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let staged = staged_file(&dir);
    let (url, request) =
        spawn_endpoint(200, r#"{"filename":"esp32_ota_firmware.bin","size":17}"#).await;

    let receipt = direct_uploader().try_upload(&staged, &url).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body["size"], 17);

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /upload HTTP/1.1"));
    assert!(request.contains("name=\"firmware\""));
    assert!(request.contains("filename=\"esp32_ota_firmware.bin\""));
    assert!(request.contains("FIRMWARE-IMAGE-v2"));
}

/// HTTP 500 is a failure carrying the response body
#[tokio::test]
async fn test_upload_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let staged = staged_file(&dir);
    let (url, _request) = spawn_endpoint(500, r#"{"error":"disk full"}"#).await;

    let err = direct_uploader().try_upload(&staged, &url).await.unwrap_err();

    match err {
        DeliveryError::TransportFailure { status, detail } => {
            assert_eq!(status, Some(500));
            assert!(detail.contains("disk full"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// The boolean contract reports false for a non-200 status
#[tokio::test]
async fn test_upload_boolean_contract() {
    let dir = tempfile::tempdir().unwrap();
    let staged = staged_file(&dir);

    let (ok_url, _) = spawn_endpoint(200, "{}").await;
    assert!(direct_uploader().upload(&staged, &ok_url).await);

    let (bad_url, _) = spawn_endpoint(400, "no firmware field").await;
    assert!(!direct_uploader().upload(&staged, &bad_url).await);
}

/// Connection refused is a failure, not a panic
#[tokio::test]
async fn test_upload_connection_refused() {
    let dir = tempfile::tempdir().unwrap();
    let staged = staged_file(&dir);
    let url = refused_endpoint().await;

    assert!(!direct_uploader().upload(&staged, &url).await);

    let err = direct_uploader().try_upload(&staged, &url).await.unwrap_err();
    assert!(matches!(err, DeliveryError::TransportFailure { status: None, .. }));
}

/// One-shot flow: build, stage, then upload inline
#[tokio::test]
async fn test_one_shot_upload_pipeline() {
    let project = tempfile::tempdir().unwrap();
    let (url, request) = spawn_endpoint(200, r#"{"status":"stored"}"#).await;

    let mut config = DeployConfig::default();
    config.local.endpoint = url;
    let launcher = Arc::new(RecordingLauncher::default());

    let report = run_with_fakes(
        &config,
        project.path(),
        DeploymentTarget::Local,
        DeliveryFlavor::Upload,
        Arc::new(FakeRunner::building("build/mqtt_ssl.bin", IMAGE)),
        launcher.clone(),
    )
    .await;

    assert!(report.overall_succeeded);
    assert_eq!(report.pipeline_name, "local-upload");
    assert_eq!(
        outcomes(&report),
        vec![
            ("Build".to_string(), true),
            ("Stage".to_string(), true),
            ("Upload".to_string(), true),
        ]
    );
    assert!(request.await.unwrap().contains("FIRMWARE-IMAGE-v2"));
    assert!(launcher.launched().is_empty());
}

/// One-shot flow against a dead endpoint fails at Upload
#[tokio::test]
async fn test_one_shot_upload_endpoint_down() {
    let project = tempfile::tempdir().unwrap();
    let mut config = DeployConfig::default();
    config.local.endpoint = refused_endpoint().await;

    let report = run_with_fakes(
        &config,
        project.path(),
        DeploymentTarget::Local,
        DeliveryFlavor::Upload,
        Arc::new(FakeRunner::building("build/mqtt_ssl.bin", IMAGE)),
        Arc::new(RecordingLauncher::default()),
    )
    .await;

    assert!(!report.overall_succeeded);
    assert_eq!(report.failed_step().unwrap().name, "Upload");
    assert!(diagnostic_of(&report, "Upload").starts_with("Upload failed"));
}
