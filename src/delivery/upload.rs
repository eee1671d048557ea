//! Multipart upload to the local delivery endpoint

use crate::delivery::DeliveryError;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

/// Multipart field the endpoint reads the image from
pub const FIRMWARE_FIELD: &str = "firmware";

/// Acknowledgment returned by the endpoint for an accepted upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub status: u16,

    /// Parsed JSON body, or the raw text when it is not JSON
    pub body: Value,
}

/// Sends a staged artifact to `POST {base}/upload`
#[derive(Debug, Clone)]
pub struct UploadTransport {
    client: Client,
}

impl UploadTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::TransportFailure {
                status: None,
                detail: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Upload the staged file, logging the outcome. Returns true only on HTTP 200.
    pub async fn upload(&self, staging_path: &Path, endpoint_base_url: &str) -> bool {
        match self.try_upload(staging_path, endpoint_base_url).await {
            Ok(receipt) => {
                info!("Firmware uploaded: {}", receipt.body);
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Upload the staged file once; no retry
    pub async fn try_upload(
        &self,
        staging_path: &Path,
        endpoint_base_url: &str,
    ) -> Result<UploadReceipt, DeliveryError> {
        // The file handle is released as soon as the read completes.
        let payload = tokio::fs::read(staging_path)
            .await
            .map_err(|e| DeliveryError::io(staging_path, e))?;

        let file_name = staging_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "firmware.bin".to_string());

        let part = Part::bytes(payload)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(transport_fault)?;
        let form = Form::new().part(FIRMWARE_FIELD, part);

        let url = upload_url(endpoint_base_url);
        debug!("POST {} ({})", url, staging_path.display());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_fault)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_fault)?;

        if status != StatusCode::OK {
            return Err(DeliveryError::TransportFailure {
                status: Some(status.as_u16()),
                detail: text,
            });
        }

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(UploadReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_fault(e: reqwest::Error) -> DeliveryError {
    DeliveryError::TransportFailure {
        status: None,
        detail: e.to_string(),
    }
}

/// Join the endpoint base and the upload route
pub fn upload_url(endpoint_base_url: &str) -> String {
    format!("{}/upload", endpoint_base_url.trim_end_matches('/'))
}
