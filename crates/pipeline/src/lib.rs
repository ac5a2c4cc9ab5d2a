//! Chunked document processing pipeline.
//!
//! The pipeline extracts a document's text, splits it into bounded chunks,
//! sends each chunk together with the user instruction to the generation
//! service, and reconciles the per-chunk responses into one combined output.
//! Completed runs are recorded in a local history database.

pub mod chunker;
pub mod driver;
pub mod extract;
pub mod history;
pub mod merger;
pub mod processor;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use chunker::{chunk_text, DEFAULT_CHUNK_SIZE};
pub use driver::{Pipeline, PipelineOptions, PipelineOutput};
pub use extract::{create_extractor, PlainTextExtractor, StirlingExtractor, TextExtractor};
pub use history::{RunHistory, RunRecord};
pub use merger::{merge, merge_to_output, MergeOutcome, MergedOutput};
pub use processor::{process_all, ProcessedBatch, ProcessorOptions};
