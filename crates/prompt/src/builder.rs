//! Prompt builder for rendering chunk templates.

use docsift_core::{AppError, AppResult};
use handlebars::Handlebars;
use serde::Serialize;

/// Template variables for one chunk prompt, camelCase in the template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChunkPromptVars<'a> {
    instruction: &'a str,
    chunk: &'a str,
    chunk_index: usize,
    total_chunks: usize,
}

/// Build the prompt for one chunk.
///
/// Renders `template` with the user instruction, the chunk text, and the
/// chunk's 1-based position in the batch.
///
/// # Example
/// ```
/// use docsift_prompt::{build_chunk_prompt, DEFAULT_CHUNK_TEMPLATE};
///
/// let prompt = build_chunk_prompt(
///     DEFAULT_CHUNK_TEMPLATE,
///     "List every invoice number.",
///     "Invoice 17 was paid. Invoice 18 is open.",
///     1,
///     1,
/// ).unwrap();
/// assert!(prompt.contains("List every invoice number."));
/// ```
pub fn build_chunk_prompt(
    template: &str,
    instruction: &str,
    chunk: &str,
    chunk_index: usize,
    total_chunks: usize,
) -> AppResult<String> {
    let variables = ChunkPromptVars {
        instruction,
        chunk,
        chunk_index,
        total_chunks,
    };

    render_template(template, &variables)
}

/// Render a Handlebars template with variables.
fn render_template<T: Serialize>(template: &str, variables: &T) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("chunk", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("chunk", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
