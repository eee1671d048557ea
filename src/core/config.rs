//! Deployment configuration from YAML

use crate::delivery::{ArtifactPaths, CloudCli};
use crate::process::CommandSpec;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the project directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

/// Top-level deployment configuration
///
/// Every section is optional; missing values fall back to the defaults of an
/// ESP-IDF project served by a local `ota_server.py`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub build: BuildConfig,
    pub staging: StagingConfig,
    pub local: LocalConfig,
    pub cloud: CloudCli,
}

/// How to build the firmware and where the binary lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build command, run in the project directory
    pub command: CommandSpec,

    /// Compiler output, relative to the project directory
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: CommandSpec::new("idf.py").arg("build"),
            output: PathBuf::from("build/mqtt_ssl.bin"),
        }
    }
}

/// Canonical location of the staged artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    pub path: PathBuf,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("firmware/esp32_ota_firmware.bin"),
        }
    }
}

/// Local delivery endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Command that starts the endpoint in the background
    pub server: CommandSpec,

    /// Base URL the endpoint listens on
    pub endpoint: String,

    /// Upload request timeout in seconds
    pub upload_timeout_secs: u64,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            server: CommandSpec::new("python").arg("ota_server.py"),
            endpoint: "http://localhost:8000".to_string(),
            upload_timeout_secs: 30,
        }
    }
}

impl DeployConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: DeployConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `deploy.yaml` in the project directory if
    /// present, else the defaults
    pub fn discover(path: Option<&Path>, project_dir: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.build.command.program.trim().is_empty() {
            anyhow::bail!("build.command.program must not be empty");
        }
        if self.build.output.as_os_str().is_empty() {
            anyhow::bail!("build.output must not be empty");
        }
        if self.staging.path.as_os_str().is_empty() {
            anyhow::bail!("staging.path must not be empty");
        }
        if self.staging.path == self.build.output {
            anyhow::bail!(
                "staging.path must differ from build.output ('{}')",
                self.build.output.display()
            );
        }
        if self.local.server.program.trim().is_empty() {
            anyhow::bail!("local.server.program must not be empty");
        }
        if !(self.local.endpoint.starts_with("http://") || self.local.endpoint.starts_with("https://")) {
            anyhow::bail!(
                "local.endpoint must be an http(s) URL, got '{}'",
                self.local.endpoint
            );
        }
        if self.cloud.program.trim().is_empty() {
            anyhow::bail!("cloud.program must not be empty");
        }
        Ok(())
    }

    /// Source and staging paths resolved against the project directory
    pub fn artifact_paths(&self, project_dir: &Path) -> ArtifactPaths {
        ArtifactPaths::new(
            project_dir.join(&self.build.output),
            project_dir.join(&self.staging.path),
        )
    }
}
