use anyhow::{Context, Result};
use ota_deploy::cli::commands::{RunCommand, ValidateCommand};
use ota_deploy::cli::output::*;
use ota_deploy::cli::{Cli, Command};
use ota_deploy::core::config::DeployConfig;
use ota_deploy::execution::{plan_pipeline, ExecutionEngine, Toolchain};
use std::path::{Path, PathBuf};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout is reserved for the report
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd, &cli, project_dir).await?,
        Command::Validate(cmd) => validate_config(cmd, &cli, &project_dir)?,
    }

    Ok(())
}

async fn run_pipeline(cmd: &RunCommand, cli: &Cli, project_dir: PathBuf) -> Result<()> {
    let mut config = DeployConfig::discover(cli.config.as_deref(), &project_dir)
        .context("Failed to load deployment config")?;
    if let Some(endpoint) = &cmd.endpoint {
        config.local.endpoint = endpoint.clone();
        config.validate().context("Invalid --endpoint")?;
    }

    let target = cmd.target();
    let flavor = cmd.flavor();

    if !cmd.json {
        println!("{}", style("=".repeat(50)).dim());
        println!("{} {}", ROCKET, style("ESP32 OTA Deployment").bold());
        println!("{}", style("=".repeat(50)).dim());
        println!("{}", format_mode(target, flavor));
        println!(
            "{} Project: {}",
            INFO,
            style(project_dir.display()).dim()
        );
        println!();
    }

    let toolchain = Toolchain::system(&config)?;
    let pipeline = plan_pipeline(&config, &project_dir, target, flavor, &toolchain)?;

    let mut engine = ExecutionEngine::new();
    let quiet = cmd.json;
    engine.add_event_handler(move |event| {
        if !quiet {
            println!("{}", format_execution_event(event));
        }
    });

    let report = engine.execute(&pipeline).await;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", format_report_summary(&report));
    }

    if !report.overall_succeeded {
        if let Some(failed) = report.failed_step() {
            error!(
                "{} failed: {}",
                failed.name,
                failed.diagnostic.as_deref().unwrap_or("no diagnostic")
            );
        }
        std::process::exit(1);
    }

    if !cmd.json {
        println!("\n{} Next steps:", INFO);
        for (i, hint) in next_steps(&config, target, flavor).iter().enumerate() {
            println!("  {}. {}", i + 1, hint);
        }
    }

    Ok(())
}

fn validate_config(cmd: &ValidateCommand, cli: &Cli, project_dir: &Path) -> Result<()> {
    let loaded = DeployConfig::discover(cli.config.as_deref(), project_dir);

    if cmd.json {
        return match loaded {
            Ok(config) => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            Err(e) => {
                error!("Validation failed: {:#}", e);
                std::process::exit(1);
            }
        };
    }

    println!("{} Validating deployment config...", INFO);
    match loaded {
        Ok(config) => {
            println!("{} Deployment configuration is valid!", CHECK);
            println!("  Build: {}", style(&config.build.command).bold());
            println!("  Output: {}", style(config.build.output.display()).cyan());
            println!("  Staging: {}", style(config.staging.path.display()).cyan());
            println!("  Endpoint: {}", style(&config.local.endpoint).cyan());
            println!("  Cloud CLI: {}", style(&config.cloud.program).cyan());
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
