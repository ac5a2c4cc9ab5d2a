//! Per-chunk processing against the generation service.

use docsift_llm::{GenerationClient, GenerationRequest};
use docsift_prompt::build_chunk_prompt;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Options controlling a processing batch.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub template: String,
    pub max_concurrency: usize,
}

/// Results of a processing batch.
#[derive(Debug, Clone)]
pub struct ProcessedBatch {
    /// One result per chunk, in chunk order
    pub results: Vec<String>,
    /// How many results are substituted error placeholders
    pub failed_chunks: usize,
}

/// Process every chunk and collect one result per chunk, in chunk order.
///
/// Each chunk is rendered into its own prompt and sent to the generation
/// service. A failing chunk does not abort the batch: its result becomes a
/// serialized `{"error": ...}` placeholder and the remaining chunks are
/// still processed. At most `max_concurrency` calls are in flight at once
/// (1 runs them strictly one after another); result order follows chunk
/// order either way.
pub async fn process_all(
    client: Arc<dyn GenerationClient>,
    chunks: &[String],
    instruction: &str,
    options: &ProcessorOptions,
) -> ProcessedBatch {
    let total = chunks.len();
    let concurrency = options.max_concurrency.max(1);

    let outcomes: Vec<(String, bool)> = stream::iter(chunks.iter().enumerate())
        .map(|(index, chunk)| {
            let client = Arc::clone(&client);
            async move {
                process_chunk(client.as_ref(), chunk, index + 1, total, instruction, options).await
            }
        })
        .buffered(concurrency)
        .collect()
        .await;

    let failed_chunks = outcomes.iter().filter(|(_, failed)| *failed).count();
    let results = outcomes.into_iter().map(|(result, _)| result).collect();

    ProcessedBatch {
        results,
        failed_chunks,
    }
}

/// Process a single chunk, substituting an error placeholder on failure.
/// The returned flag marks a substituted result.
async fn process_chunk(
    client: &dyn GenerationClient,
    chunk: &str,
    chunk_index: usize,
    total_chunks: usize,
    instruction: &str,
    options: &ProcessorOptions,
) -> (String, bool) {
    match generate_for_chunk(client, chunk, chunk_index, total_chunks, instruction, options).await {
        Ok(text) => {
            tracing::info!("Processed chunk {}/{}", chunk_index, total_chunks);
            (text, false)
        }
        Err(e) => {
            tracing::warn!(
                "Error processing chunk {}/{}: {}",
                chunk_index,
                total_chunks,
                e
            );
            let placeholder = serde_json::json!({ "error": e.to_string() });
            (placeholder.to_string(), true)
        }
    }
}

async fn generate_for_chunk(
    client: &dyn GenerationClient,
    chunk: &str,
    chunk_index: usize,
    total_chunks: usize,
    instruction: &str,
    options: &ProcessorOptions,
) -> docsift_core::AppResult<String> {
    let prompt = build_chunk_prompt(
        &options.template,
        instruction,
        chunk,
        chunk_index,
        total_chunks,
    )?;

    let mut request = GenerationRequest::new(prompt, options.model.clone());
    if let Some(temperature) = options.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(max_output_tokens) = options.max_output_tokens {
        request = request.with_max_output_tokens(max_output_tokens);
    }

    client.generate(&request).await
}
