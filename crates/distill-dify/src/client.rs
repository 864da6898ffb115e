//! Dify dataset upload client.

use crate::error::{DifyError, DifyResult};
use distill_config::DifyConfig;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Extensions Dify accepts for document creation.
const SUPPORTED_EXTENSIONS: [&str; 6] = ["txt", "md", "pdf", "html", "docx", "csv"];

/// Outcome of a single upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The file was accepted by the dataset.
    Uploaded,
    /// The file has an unsupported extension and was skipped silently.
    Skipped,
}

/// Client for Dify's dataset document API.
#[derive(Clone)]
pub struct DifyClient {
    client: Client,
    api_url: String,
    api_key: String,
    dataset_id: String,
}

impl DifyClient {
    /// Create a client from configuration. Fails when required fields are
    /// missing rather than at upload time.
    pub fn from_config(config: &DifyConfig) -> DifyResult<Self> {
        for (name, value) in [
            ("dify.api_url", &config.api_url),
            ("dify.api_key", &config.api_key),
            ("dify.dataset_id", &config.dataset_id),
        ] {
            if value.trim().is_empty() {
                return Err(DifyError::NotConfigured(format!("{} is not set", name)));
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(DifyError::Http)?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            dataset_id: config.dataset_id.clone(),
        })
    }

    /// Upload a single file to the configured dataset.
    ///
    /// Files with unsupported extensions are skipped without contacting the
    /// API.
    pub async fn upload_file(&self, path: &Path) -> DifyResult<UploadOutcome> {
        if !path.exists() {
            return Err(DifyError::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            debug!("skipping unsupported file: {}", path.display());
            return Ok(UploadOutcome::Skipped);
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        let bytes = tokio::fs::read(path).await?;

        let payload = serde_json::json!({
            "indexing_technique": "economy",
            "process_rule": { "mode": "automatic" },
        });

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.clone()))
            .text("data", payload.to_string());

        let url = format!(
            "{}/datasets/{}/document/create_by_file",
            self.api_url, self.dataset_id
        );
        debug!("uploading {} to {}", file_name, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DifyError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        info!("uploaded {} to Dify dataset {}", file_name, self.dataset_id);
        Ok(UploadOutcome::Uploaded)
    }
}
