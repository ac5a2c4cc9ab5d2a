//! End-to-end pipeline flow tests with a scripted generation client.

use crate::driver::{Pipeline, PipelineOptions};
use crate::extract::PlainTextExtractor;
use docsift_core::AppError;
use docsift_llm::MockGenerationClient;
use docsift_prompt::DEFAULT_CHUNK_TEMPLATE;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn pipeline_options(chunk_size: usize) -> PipelineOptions {
    PipelineOptions {
        chunk_size,
        model: "gemini-2.0-flash-exp".to_string(),
        temperature: None,
        max_output_tokens: None,
        template: DEFAULT_CHUNK_TEMPLATE.to_string(),
        max_concurrency: 1,
    }
}

fn pipeline_with(client: Arc<MockGenerationClient>, chunk_size: usize) -> Pipeline {
    Pipeline::new(
        Arc::new(PlainTextExtractor::new()),
        client,
        pipeline_options(chunk_size),
    )
}

#[tokio::test]
async fn test_missing_document_fails_before_any_call() {
    let client = Arc::new(MockGenerationClient::new());
    let pipeline = pipeline_with(client.clone(), 100);

    let result = pipeline
        .run(Path::new("/nonexistent/report.pdf"), "extract names")
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "File not found at /nonexistent/report.pdf");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_single_chunk_structured_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Alice met Bob. They signed the deal").unwrap();

    let client = Arc::new(MockGenerationClient::new().with_reply(r#"["Alice", "Bob"]"#));
    let pipeline = pipeline_with(client.clone(), 30000);

    let output = pipeline.run(file.path(), "extract names").await.unwrap();

    assert_eq!(output.chunk_count, 1);
    assert_eq!(output.failed_chunks, 0);
    assert_eq!(output.merge_tier, "structured");
    assert_eq!(
        output.text,
        serde_json::to_string_pretty(&json!(["Alice", "Bob"])).unwrap()
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.contains("USER INSTRUCTION: extract names"));
    assert!(calls[0].prompt.contains("Chunk 1/1"));
    assert!(calls[0].prompt.contains("Alice met Bob."));
}

#[tokio::test]
async fn test_multi_chunk_object_merge() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "aaaa. bbbb").unwrap();

    let client = Arc::new(
        MockGenerationClient::new()
            .with_reply(r#"{"items": [1]}"#)
            .with_reply(r#"{"items": [2]}"#),
    );
    // Chunk size small enough to force one sentence per chunk
    let pipeline = pipeline_with(client.clone(), 10);

    let output = pipeline.run(file.path(), "list items").await.unwrap();

    assert_eq!(output.chunk_count, 2);
    assert_eq!(output.merge_tier, "structured");
    assert_eq!(
        output.text,
        serde_json::to_string_pretty(&json!({"items": [1, 2]})).unwrap()
    );
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_failed_chunk_counted_but_run_succeeds() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "aaaa. bbbb").unwrap();

    let client = Arc::new(
        MockGenerationClient::new()
            .with_reply(r#"["ok item"]"#)
            .with_failure("service unavailable"),
    );
    let pipeline = pipeline_with(client, 10);

    let output = pipeline.run(file.path(), "list items").await.unwrap();

    assert_eq!(output.chunk_count, 2);
    assert_eq!(output.failed_chunks, 1);
    // The placeholder is an object, so the list merge skips it
    assert_eq!(output.merge_tier, "structured");
    assert_eq!(
        output.text,
        serde_json::to_string_pretty(&json!(["ok item"])).unwrap()
    );
}

#[tokio::test]
async fn test_empty_document_produces_empty_output() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let client = Arc::new(MockGenerationClient::new());
    let pipeline = pipeline_with(client.clone(), 30000);

    let output = pipeline.run(file.path(), "extract names").await.unwrap();

    assert_eq!(output.chunk_count, 0);
    assert_eq!(output.failed_chunks, 0);
    assert_eq!(output.merge_tier, "plain-text");
    assert_eq!(output.text, "");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_opaque_results_keep_original_sequence() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "aaaa. bbbb").unwrap();

    let client = Arc::new(
        MockGenerationClient::new()
            .with_reply("a prose summary")
            .with_reply("another prose summary"),
    );
    let pipeline = pipeline_with(client, 10);

    let output = pipeline.run(file.path(), "summarize").await.unwrap();

    assert_eq!(output.merge_tier, "original-sequence");
    assert_eq!(
        output.text,
        serde_json::to_string_pretty(&json!([
            "a prose summary",
            "another prose summary"
        ]))
        .unwrap()
    );
}
