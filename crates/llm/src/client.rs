//! Generation client abstraction and request type.
//!
//! This module defines the core abstraction for calling the external
//! text-generation service once per chunk.

use docsift_core::AppResult;
use serde::{Deserialize, Serialize};

/// A single generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The rendered prompt text to send to the service
    pub prompt: String,

    /// Model identifier (e.g., "gemini-2.0-flash-exp")
    pub model: String,

    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a new generation request with required fields.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Trait for generation service providers.
///
/// This trait abstracts the underlying service (Gemini, or a scripted mock
/// in tests) behind a single stateless call: prompt in, response text out.
/// There is no multi-turn state and no streaming.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// Get the provider name (e.g., "gemini").
    fn provider_name(&self) -> &str;

    /// Perform one generation call.
    ///
    /// # Arguments
    /// * `request` - The generation request
    ///
    /// # Returns
    /// The response text, with any markdown code fences already stripped.
    ///
    /// # Errors
    /// `AppError::Service` on auth, quota, transport, or malformed-response
    /// failures.
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = GenerationRequest::new("prompt", "gemini-2.0-flash-exp")
            .with_temperature(0.7)
            .with_max_output_tokens(2048);

        assert_eq!(request.prompt, "prompt");
        assert_eq!(request.model, "gemini-2.0-flash-exp");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_output_tokens, Some(2048));
    }
}
