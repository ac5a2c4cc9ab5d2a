//! Template loading and validation.

use std::path::Path;

use docsift_core::{AppError, AppResult};

use crate::builder::build_chunk_prompt;
use crate::template::DEFAULT_CHUNK_TEMPLATE;

/// Load the chunk prompt template.
///
/// Returns the built-in template when no path is given, otherwise reads the
/// file at `path`. The template is validated with a trial render so a broken
/// template fails the run at startup rather than on every chunk.
pub fn load_template(path: Option<&Path>) -> AppResult<String> {
    let template = match path {
        Some(path) => {
            tracing::debug!(template = %path.display(), "Loading custom chunk template");
            std::fs::read_to_string(path).map_err(|e| {
                AppError::Prompt(format!("Failed to read template file {:?}: {}", path, e))
            })?
        }
        None => DEFAULT_CHUNK_TEMPLATE.to_string(),
    };

    build_chunk_prompt(&template, "", "", 1, 1)
        .map_err(|e| AppError::Prompt(format!("Invalid chunk template: {}", e)))?;

    Ok(template)
}
