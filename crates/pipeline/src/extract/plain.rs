//! Plain text extraction for documents that are already text.

use super::TextExtractor;
use docsift_core::{AppError, AppResult};
use std::path::Path;

/// Reads the document as UTF-8 text.
///
/// Form feeds, used as page separators by some text exports, are normalized
/// to newlines so downstream always sees pages joined by newlines.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TextExtractor for PlainTextExtractor {
    fn extractor_name(&self) -> &str {
        "plain"
    }

    async fn extract(&self, path: &Path) -> AppResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to read {:?}: {}", path, e)))?;

        let text = String::from_utf8(bytes).map_err(|_| {
            AppError::Extraction(format!(
                "{:?} is not UTF-8 text; configure an extraction endpoint for binary documents",
                path
            ))
        })?;

        Ok(text.replace('\u{0c}', "\n"))
    }
}
