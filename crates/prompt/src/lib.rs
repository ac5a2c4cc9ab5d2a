//! Prompt system for the docsift CLI.
//!
//! This crate renders the per-chunk prompt sent to the generation service.
//! Each prompt embeds the user instruction, the chunk text tagged with its
//! position in the batch, and the JSON output directions. Templates use
//! Handlebars syntax and can be replaced per run.

pub mod builder;
pub mod loader;
pub mod template;

// Re-export main types
pub use builder::build_chunk_prompt;
pub use loader::load_template;
pub use template::DEFAULT_CHUNK_TEMPLATE;
