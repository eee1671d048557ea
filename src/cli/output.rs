//! CLI output formatting

use crate::core::{config::DeployConfig, DeliveryFlavor, DeploymentTarget, ExecutionStatus, RunReport};
use crate::execution::ExecutionEvent;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static CLOUD: Emoji<'_, '_> = Emoji("☁️  ", "* ");
pub static HOUSE: Emoji<'_, '_> = Emoji("🏠 ", "* ");

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Banner line describing the selected mode
pub fn format_mode(target: DeploymentTarget, flavor: DeliveryFlavor) -> String {
    match (target, flavor) {
        (DeploymentTarget::Cloud, _) => format!("{} Mode: cloud deployment", CLOUD),
        (DeploymentTarget::Local, DeliveryFlavor::Server) => {
            format!("{} Mode: local server", HOUSE)
        }
        (DeploymentTarget::Local, DeliveryFlavor::Upload) => {
            format!("{} Mode: upload to local server", HOUSE)
        }
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name,
            target,
            started_at,
        } => format!(
            "{} Starting pipeline {} ({}) -> {} at {}",
            ROCKET,
            style(pipeline_name).bold(),
            style(&execution_id.to_string()[..8]).dim(),
            style(target).cyan(),
            style(started_at.to_rfc3339()).dim()
        ),
        ExecutionEvent::StepStarted {
            step_name,
            index,
            total,
        } => format!(
            "{} [{}/{}] {}",
            SPINNER,
            index + 1,
            total,
            style(step_name).cyan()
        ),
        ExecutionEvent::StepCompleted { step_name } => {
            format!("{} {}", CHECK, style(step_name).green())
        }
        ExecutionEvent::StepFailed { step_name, error } => {
            format!("{} {}: {}", CROSS, style(step_name).red(), style(error).dim())
        }
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
            failed_step,
        } => {
            let status_str = match (status, failed_step) {
                (ExecutionStatus::Completed, _) => {
                    format!("{} completed", style("successfully").green())
                }
                (ExecutionStatus::Failed, Some(step)) => {
                    format!("{} at {}", style("failed").red(), style(step).bold())
                }
                _ => format_status(*status),
            };
            format!(
                "{} Pipeline ({}) {}",
                INFO,
                style(&execution_id.to_string()[..8]).dim(),
                status_str
            )
        }
    }
}

/// One-line summary of a finished run
pub fn format_report_summary(report: &RunReport) -> String {
    if report.overall_succeeded {
        format!(
            "{} {} completed {} ({} steps)",
            CHECK,
            style(&report.pipeline_name).bold(),
            style("successfully").green(),
            report.step_outcomes.len()
        )
    } else {
        let failed = report
            .failed_step()
            .map(|o| o.name.as_str())
            .unwrap_or("unknown step");
        format!(
            "{} {} {} at {}",
            CROSS,
            style(&report.pipeline_name).bold(),
            style("failed").red(),
            style(failed).bold()
        )
    }
}

/// What the operator can do after a successful run
pub fn next_steps(
    config: &DeployConfig,
    target: DeploymentTarget,
    flavor: DeliveryFlavor,
) -> Vec<String> {
    match (target, flavor) {
        (DeploymentTarget::Cloud, _) => vec![format!(
            "Check the deployment status with `{} status`",
            config.cloud.program
        )],
        (DeploymentTarget::Local, DeliveryFlavor::Server) => vec![
            format!("Delivery endpoint starting at {}", config.local.endpoint),
            format!(
                "Upload the staged image with `ota-deploy run --upload` ({})",
                config.staging.path.display()
            ),
        ],
        (DeploymentTarget::Local, DeliveryFlavor::Upload) => vec![
            "Flash the initial firmware: idf.py -p PORT flash monitor".to_string(),
            "The device joins WiFi and downloads the update".to_string(),
            "Progress is shown on the serial monitor".to_string(),
        ],
    }
}
