//! Test: cloud target through the platform CLI

use crate::helpers::*;
use ota_deploy::core::config::DeployConfig;
use ota_deploy::process::CommandResult;
use ota_deploy::{DeliveryFlavor, DeploymentTarget};
use std::sync::Arc;

fn build_then<F>(cli: F) -> FakeRunner
where
    F: Fn(&str) -> CommandResult + Send + Sync + 'static,
{
    FakeRunner::new(move |command, dir| {
        if command.program == "idf.py" {
            let path = dir.join("build/mqtt_ssl.bin");
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, b"image").unwrap();
            CommandResult::completed(0, "", "")
        } else {
            cli(&command.to_string())
        }
    })
}

/// The CLI is absent: not-installed diagnostic, deploy never invoked
#[tokio::test]
async fn test_cloud_cli_missing() {
    let project = tempfile::tempdir().unwrap();
    let runner = Arc::new(build_then(|_| {
        CommandResult::launch_failed("railway: No such file or directory")
    }));

    let report = run_with_fakes(
        &DeployConfig::default(),
        project.path(),
        DeploymentTarget::Cloud,
        DeliveryFlavor::Server,
        runner.clone(),
        Arc::new(RecordingLauncher::default()),
    )
    .await;

    assert!(!report.overall_succeeded);
    assert_eq!(
        outcomes(&report),
        vec![
            ("Build".to_string(), true),
            ("Stage".to_string(), true),
            ("CloudDeploy".to_string(), false),
        ]
    );

    let diagnostic = diagnostic_of(&report, "CloudDeploy");
    assert!(diagnostic.contains("railway is not installed"));
    assert!(diagnostic.contains("npm install -g @railway/cli"));
    assert!(!diagnostic.contains("exited with code"));

    assert_eq!(runner.calls(), vec!["idf.py build", "railway --version"]);
}

/// The CLI is present but the deploy subcommand fails
#[tokio::test]
async fn test_cloud_deploy_command_fails() {
    let project = tempfile::tempdir().unwrap();
    let runner = Arc::new(build_then(|command| match command {
        "railway --version" => CommandResult::completed(0, "railway 3.5.0", ""),
        _ => CommandResult::completed(1, "", "Unauthorized. Please login with `railway login`"),
    }));

    let report = run_with_fakes(
        &DeployConfig::default(),
        project.path(),
        DeploymentTarget::Cloud,
        DeliveryFlavor::Server,
        runner.clone(),
        Arc::new(RecordingLauncher::default()),
    )
    .await;

    assert!(!report.overall_succeeded);
    let diagnostic = diagnostic_of(&report, "CloudDeploy");
    assert!(diagnostic.contains("`railway up` exited with code 1"));
    assert!(diagnostic.contains("Unauthorized"));
    assert!(!diagnostic.contains("not installed"));

    assert_eq!(
        runner.calls(),
        vec!["idf.py build", "railway --version", "railway up"]
    );
}

/// Probe and deploy both succeed
#[tokio::test]
async fn test_cloud_deploy_succeeds() {
    let project = tempfile::tempdir().unwrap();
    let runner = Arc::new(build_then(|_| CommandResult::completed(0, "ok", "")));
    let launcher = Arc::new(RecordingLauncher::default());

    let report = run_with_fakes(
        &DeployConfig::default(),
        project.path(),
        DeploymentTarget::Cloud,
        DeliveryFlavor::Server,
        runner,
        launcher.clone(),
    )
    .await;

    assert!(report.overall_succeeded);
    assert_eq!(report.step_outcomes.len(), 3);
    assert_eq!(report.target, DeploymentTarget::Cloud);
    // The local endpoint is never started for the cloud target.
    assert!(launcher.launched().is_empty());
}
