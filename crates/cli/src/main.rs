//! Docsift CLI
//!
//! Main entry point for the docsift command-line tool. Processes a document
//! against a free-text instruction by splitting its text into bounded chunks,
//! sending each chunk to a generation service, and merging the responses into
//! one result on stdout.

mod commands;

use clap::Parser;
use commands::ProcessCommand;
use docsift_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Docsift - chunked document processing with a generation service
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(about = "Process a document with a generation service, chunk by chunk", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "DOCSIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    #[command(flatten)]
    process: ProcessCommand,
}

#[tokio::main]
async fn main() {
    // Parse arguments by hand so usage errors exit 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Load base configuration, then apply CLI overrides
    let config = AppConfig::load(cli.config.clone())?;
    let config = config.with_overrides(
        cli.process.model.clone(),
        Some(cli.process.api_key.clone()),
        cli.process.chunk_size,
        cli.process.max_concurrency,
        cli.process.temperature,
        cli.process.max_output_tokens,
        cli.process.template.clone(),
        cli.process.no_history,
        cli.log_level.clone(),
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Docsift starting");
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Chunk size: {}", config.chunk_size);
    tracing::debug!("Max concurrency: {}", config.max_concurrency);

    config.validate()?;

    let _span = tracing::info_span!("process").entered();

    let result = cli.process.execute(&config).await;

    match &result {
        Ok(_) => tracing::info!("Run completed successfully"),
        Err(e) => tracing::error!("Run failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_three_positionals() {
        let cli = Cli::try_parse_from(["docsift", "report.pdf", "extract all names", "key-123"])
            .unwrap();

        assert_eq!(cli.process.document, PathBuf::from("report.pdf"));
        assert_eq!(cli.process.instruction, "extract all names");
        assert_eq!(cli.process.api_key, "key-123");
        assert!(!cli.process.no_history);
    }

    #[test]
    fn test_parses_flags() {
        let cli = Cli::try_parse_from([
            "docsift",
            "report.pdf",
            "extract all names",
            "key-123",
            "--model",
            "gemini-1.5-pro",
            "--chunk-size",
            "5000",
            "--max-concurrency",
            "4",
            "--output",
            "result.json",
            "--no-history",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.process.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(cli.process.chunk_size, Some(5000));
        assert_eq!(cli.process.max_concurrency, Some(4));
        assert_eq!(cli.process.output, Some(PathBuf::from("result.json")));
        assert!(cli.process.no_history);
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_document_is_usage_error() {
        let err = Cli::try_parse_from(["docsift"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
