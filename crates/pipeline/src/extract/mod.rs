//! Document text extraction.
//!
//! The pipeline consumes one string of extracted text per document. Plain
//! text files are read directly; binary formats such as PDF go through a
//! Stirling-PDF-compatible conversion service.

pub mod plain;
pub mod stirling;

pub use plain::PlainTextExtractor;
pub use stirling::StirlingExtractor;

use docsift_core::{AppConfig, AppResult};
use std::path::Path;
use std::sync::Arc;

/// Trait for document text extractors.
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Get the extractor name (e.g., "plain", "stirling").
    fn extractor_name(&self) -> &str;

    /// Extract the document's text as a single string, pages joined by
    /// newlines.
    async fn extract(&self, path: &Path) -> AppResult<String>;
}

/// Create a text extractor based on configuration.
///
/// Documents go through the extraction service when an endpoint is
/// configured, and are read as plain text otherwise.
pub fn create_extractor(config: &AppConfig) -> Arc<dyn TextExtractor> {
    match config.extraction_endpoint {
        Some(ref endpoint) => Arc::new(StirlingExtractor::new(
            endpoint,
            config.extraction_api_key.as_deref(),
        )),
        None => Arc::new(PlainTextExtractor::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_extractor_defaults_to_plain() {
        let config = AppConfig::default();
        let extractor = create_extractor(&config);
        assert_eq!(extractor.extractor_name(), "plain");
    }

    #[test]
    fn test_create_extractor_uses_service_when_configured() {
        let config = AppConfig {
            extraction_endpoint: Some("http://localhost:8080".to_string()),
            ..Default::default()
        };
        let extractor = create_extractor(&config);
        assert_eq!(extractor.extractor_name(), "stirling");
    }
}
