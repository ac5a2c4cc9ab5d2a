//! Extraction via a Stirling-PDF-compatible conversion service.

use super::TextExtractor;
use docsift_core::{AppError, AppResult};
use std::path::Path;
use std::time::Duration;

/// Timeout for one conversion call. Large documents take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for a Stirling-PDF-compatible extraction service.
///
/// Uploads the document as multipart `fileInput` to
/// `POST {endpoint}/api/v1/convert/pdf/text` and returns the response body
/// as the extracted text.
pub struct StirlingExtractor {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl StirlingExtractor {
    /// Create a new extractor against the given service endpoint.
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.map(|k| k.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl TextExtractor for StirlingExtractor {
    fn extractor_name(&self) -> &str {
        "stirling"
    }

    async fn extract(&self, path: &Path) -> AppResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to read {:?}: {}", path, e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        tracing::debug!("Uploading {} ({} bytes) for extraction", file_name, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("fileInput", part);

        let url = format!("{}/api/v1/convert/pdf/text", self.base_url);
        let mut request = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .multipart(form);

        if let Some(ref key) = self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::Extraction(format!("Failed to reach extraction service: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Extraction(format!(
                "Extraction service error ({}): {}",
                status, error_text
            )));
        }

        response.text().await.map_err(|e| {
            AppError::Extraction(format!("Failed to read extraction response: {}", e))
        })
    }
}
