//! Pipeline orchestration.
//!
//! Wires extraction, chunking, processing, and merging together for one
//! document and returns the merged output with run statistics.

use crate::chunker;
use crate::extract::TextExtractor;
use crate::merger;
use crate::processor::{self, ProcessorOptions};
use docsift_core::{AppError, AppResult};
use docsift_llm::GenerationClient;
use std::path::Path;
use std::sync::Arc;

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub chunk_size: usize,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub template: String,
    pub max_concurrency: usize,
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The merged output text
    pub text: String,
    /// Number of chunks the document was split into
    pub chunk_count: usize,
    /// Number of chunks that failed and were substituted
    pub failed_chunks: usize,
    /// Merge tier that produced the output
    pub merge_tier: &'static str,
}

/// The chunk, process, and merge pipeline for one document.
pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    client: Arc<dyn GenerationClient>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        client: Arc<dyn GenerationClient>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor,
            client,
            options,
        }
    }

    /// Run the pipeline for one document and instruction.
    ///
    /// Fails fast if the document does not exist. Per-chunk generation
    /// failures do not fail the run; they surface as substituted error
    /// placeholders and in `failed_chunks`.
    pub async fn run(&self, document: &Path, instruction: &str) -> AppResult<PipelineOutput> {
        if !document.exists() {
            return Err(AppError::NotFound(document.to_path_buf()));
        }

        tracing::info!(
            "Extracting text from {:?} ({})",
            document,
            self.extractor.extractor_name()
        );
        let text = self.extractor.extract(document).await?;
        tracing::info!("Extracted {} characters", text.chars().count());

        let chunks = chunker::chunk_text(&text, self.options.chunk_size);
        tracing::info!("Processing {} chunks", chunks.len());

        let processor_options = ProcessorOptions {
            model: self.options.model.clone(),
            temperature: self.options.temperature,
            max_output_tokens: self.options.max_output_tokens,
            template: self.options.template.clone(),
            max_concurrency: self.options.max_concurrency,
        };

        let batch = processor::process_all(
            Arc::clone(&self.client),
            &chunks,
            instruction,
            &processor_options,
        )
        .await;

        let merged = merger::merge_to_output(&batch.results);
        tracing::info!(
            "Merged {} results ({} failed) via the {} tier",
            batch.results.len(),
            batch.failed_chunks,
            merged.tier
        );

        Ok(PipelineOutput {
            text: merged.text,
            chunk_count: chunks.len(),
            failed_chunks: batch.failed_chunks,
            merge_tier: merged.tier,
        })
    }
}
