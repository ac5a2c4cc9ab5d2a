//! Generation service integration for the docsift CLI.
//!
//! This crate provides a provider-agnostic abstraction over the external
//! text-generation service: given a rendered prompt, return the response
//! text. Providers sit behind the `GenerationClient` trait so the pipeline
//! can be exercised against a scripted mock.
//!
//! # Providers
//! - **Gemini**: Google Gemini over the `generateContent` REST API (default)
//! - **Mock**: scripted replies for tests
//!
//! # Example
//! ```no_run
//! use docsift_llm::{GenerationClient, GenerationRequest, providers::GeminiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("api-key");
//! let request = GenerationRequest::new("Summarize this.", "gemini-2.0-flash-exp");
//! let text = client.generate(&request).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{GenerationClient, GenerationRequest};
pub use factory::create_client;
pub use providers::{GeminiClient, MockGenerationClient};
