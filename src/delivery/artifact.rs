//! Locating and staging the build artifact

use crate::delivery::DeliveryError;
use serde::{Deserialize, Serialize};
use std::fs::{FileTimes, Metadata, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

/// Where the compiler leaves the binary and where it is staged for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Expected compiler output location
    pub source_path: PathBuf,

    /// Canonical delivery name
    pub staging_path: PathBuf,
}

impl ArtifactPaths {
    pub fn new(source_path: impl Into<PathBuf>, staging_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            staging_path: staging_path.into(),
        }
    }
}

/// Copies the build artifact to its staging location
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactLocator;

impl ArtifactLocator {
    /// Stage the artifact, logging any fault. Returns true only on a successful copy.
    pub async fn stage(paths: &ArtifactPaths) -> bool {
        match Self::try_stage(paths).await {
            Ok(_) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Stage the artifact and return the number of bytes copied
    ///
    /// The staging directory is created first. A missing source is reported
    /// as `MissingArtifact` and leaves the staging path untouched; an existing
    /// staged file is overwritten.
    pub async fn try_stage(paths: &ArtifactPaths) -> Result<u64, DeliveryError> {
        if let Some(parent) = paths.staging_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DeliveryError::io(parent, e))?;
            }
        }

        let metadata = match fs::metadata(&paths.source_path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Err(DeliveryError::MissingArtifact(paths.source_path.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DeliveryError::MissingArtifact(paths.source_path.clone()))
            }
            Err(e) => return Err(DeliveryError::io(&paths.source_path, e)),
        };

        // Copying a file onto itself truncates it.
        if is_same_file(&paths.source_path, &paths.staging_path).await {
            return Err(DeliveryError::SameFile(paths.source_path.clone()));
        }

        let bytes = fs::copy(&paths.source_path, &paths.staging_path)
            .await
            .map_err(|e| DeliveryError::io(&paths.staging_path, e))?;

        if let Err(e) = copy_times(&metadata, &paths.staging_path) {
            warn!(
                "Could not preserve timestamps on {}: {}",
                paths.staging_path.display(),
                e
            );
        }

        info!(
            "Staged {} -> {} ({} bytes)",
            paths.source_path.display(),
            paths.staging_path.display(),
            bytes
        );

        Ok(bytes)
    }
}

async fn is_same_file(source: &Path, staging: &Path) -> bool {
    match (fs::canonicalize(source).await, fs::canonicalize(staging).await) {
        (Ok(source), Ok(staging)) => source == staging,
        _ => false,
    }
}

/// Carry access/modification times over to the staged copy
///
/// Permissions are already copied by `fs::copy`; a read-only copy falls back
/// to a read handle, which is enough for the owner on unix.
fn copy_times(source: &Metadata, dest: &Path) -> io::Result<()> {
    let mut times = FileTimes::new();
    if let Ok(modified) = source.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = source.accessed() {
        times = times.set_accessed(accessed);
    }

    let file = match OpenOptions::new().write(true).open(dest) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => std::fs::File::open(dest)?,
        Err(e) => return Err(e),
    };
    file.set_times(times)
}
