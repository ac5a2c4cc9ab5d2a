//! Process command handler.
//!
//! Runs the chunk/process/merge pipeline for one document and emits the
//! merged result.

use clap::Args;
use docsift_core::{config::AppConfig, AppError, AppResult};
use docsift_llm::create_client;
use docsift_pipeline::{
    create_extractor, Pipeline, PipelineOptions, PipelineOutput, RunHistory, RunRecord,
};
use docsift_prompt::load_template;
use std::path::PathBuf;

/// Process a document with a generation service
#[derive(Args, Debug)]
pub struct ProcessCommand {
    /// Path to the document to process
    pub document: PathBuf,

    /// Instruction describing what to extract or produce
    pub instruction: String,

    /// Gemini API key
    #[arg(env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Maximum concurrent generation calls (default: 1, serial)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Sampling temperature (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Maximum tokens in each response
    #[arg(long)]
    pub max_output_tokens: Option<u32>,

    /// Custom chunk prompt template file (Handlebars)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Write the merged result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip recording this run in the history database
    #[arg(long)]
    pub no_history: bool,
}

impl ProcessCommand {
    /// Execute the process command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Processing {:?}", self.document);
        tracing::debug!("Instruction: {}", self.instruction);

        let started_at = chrono::Utc::now();
        let start = std::time::Instant::now();

        let api_key = config.resolve_api_key().ok_or_else(|| {
            AppError::Config("No API key provided (argument or GEMINI_API_KEY)".to_string())
        })?;

        // A broken custom template fails here, before any service call
        let template = load_template(config.template_file.as_deref())?;

        let client = create_client("gemini", Some(&config.endpoint), Some(&api_key))?;
        let extractor = create_extractor(config);

        let options = PipelineOptions {
            chunk_size: config.chunk_size,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            template,
            max_concurrency: config.max_concurrency,
        };

        let pipeline = Pipeline::new(extractor, client, options);
        let output = pipeline.run(&self.document, &self.instruction).await?;

        match self.output {
            Some(ref path) => {
                std::fs::write(path, &output.text).map_err(|e| {
                    AppError::Pipeline(format!("Failed to write output to {:?}: {}", path, e))
                })?;
                tracing::info!("Wrote {} bytes to {:?}", output.text.len(), path);
            }
            None => println!("{}", output.text),
        }

        if config.history {
            self.record_history(&output, started_at, start.elapsed());
        }

        Ok(())
    }

    /// Record the run in the history database. Best-effort: failures are
    /// logged and never fail the run.
    fn record_history(
        &self,
        output: &PipelineOutput,
        started_at: chrono::DateTime<chrono::Utc>,
        elapsed: std::time::Duration,
    ) {
        let record = RunRecord {
            document: self.document.display().to_string(),
            instruction: self.instruction.clone(),
            chunk_count: output.chunk_count as u32,
            failed_chunks: output.failed_chunks as u32,
            merge_tier: output.merge_tier.to_string(),
            output_bytes: output.text.len() as u64,
            started_at,
            duration_ms: elapsed.as_millis() as u64,
        };

        let result = RunHistory::open_default().and_then(|history| history.record_run(&record));
        if let Err(e) = result {
            tracing::warn!("Failed to record run history: {}", e);
        }
    }
}
