//! Built-in chunk prompt template.

/// Default template for the per-chunk prompt.
///
/// Variables:
/// - `instruction`: the user's free-form instruction
/// - `chunk`: the chunk text
/// - `chunkIndex`: 1-based position of the chunk in the batch
/// - `totalChunks`: number of chunks in the batch
///
/// The output directions steer the model towards raw JSON so the merger
/// can reconcile the per-chunk results structurally. Chunks are processed
/// independently; the position tag is the only cross-chunk context the
/// model sees.
pub const DEFAULT_CHUNK_TEMPLATE: &str = r#"You are a helpful assistant that extracts information from text.

USER INSTRUCTION: {{instruction}}

DATA TO PROCESS (Chunk {{chunkIndex}}/{{totalChunks}}):
{{chunk}}

OUTPUT FORMAT:
Please provide the output in valid JSON format.
If the user asked for a list, return a JSON object with a key "items" containing the list.
Do not include markdown formatting (like ```json). Just return the raw JSON string.
"#;
