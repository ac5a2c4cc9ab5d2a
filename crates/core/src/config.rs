//! Configuration management for the docsift CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config files (docsift.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The environment variable names follow the generation
//! and extraction services (`GEMINI_*`, `STIRLING_*`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default generation model when neither config nor environment names one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default generation API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation model identifier
    pub model: String,

    /// Generation API base endpoint
    pub endpoint: String,

    /// API key for the generation service
    pub api_key: Option<String>,

    /// Sampling temperature passed to the generation service
    pub temperature: Option<f32>,

    /// Output token cap passed to the generation service
    pub max_output_tokens: Option<u32>,

    /// Extraction service endpoint; when unset, documents are read as plain text
    pub extraction_endpoint: Option<String>,

    /// API key for the extraction service
    pub extraction_api_key: Option<String>,

    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// How many generation calls may be in flight at once.
    /// Defaults to 1: calls are serialized to keep the request rate
    /// against the service predictable.
    pub max_concurrency: usize,

    /// Optional custom chunk-prompt template file
    pub template_file: Option<PathBuf>,

    /// Record completed runs in the local history database
    pub history: bool,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    generation: Option<GenerationConfig>,
    extraction: Option<ExtractionConfig>,
    pipeline: Option<PipelineConfig>,
    logging: Option<LoggingConfig>,
}

/// Generation service section of docsift.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerationConfig {
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: Option<u32>,
}

/// Extraction service section of docsift.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExtractionConfig {
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

/// Pipeline section of docsift.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PipelineConfig {
    #[serde(rename = "chunkSize")]
    chunk_size: Option<usize>,
    #[serde(rename = "maxConcurrency")]
    max_concurrency: Option<usize>,
    template: Option<String>,
    history: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            temperature: None,
            max_output_tokens: None,
            extraction_endpoint: None,
            extraction_api_key: None,
            chunk_size: 30000,
            max_concurrency: 1,
            template_file: None,
            history: true,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config file, and environment.
    ///
    /// The config file is taken from `config_file` if given, then the
    /// `DOCSIFT_CONFIG` environment variable, then `docsift.yaml` in the
    /// working directory if it exists.
    ///
    /// Environment variables:
    /// - `GEMINI_API_KEY`: Generation API key
    /// - `GEMINI_MODEL`: Generation model identifier
    /// - `GEMINI_TEMPERATURE`: Sampling temperature
    /// - `GEMINI_MAX_TOKENS`: Output token cap
    /// - `STIRLING_PDF_URL`: Extraction service endpoint
    /// - `STIRLING_API_KEY`: Extraction service API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docsift_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Model: {}", config.model);
    /// ```
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        // Resolve which config file to read, if any
        let config_path = config_file
            .or_else(|| std::env::var("DOCSIFT_CONFIG").ok().map(PathBuf::from))
            .or_else(|| {
                let default = PathBuf::from("docsift.yaml");
                default.exists().then_some(default)
            });

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            config = config.merge_yaml(&path)?;
            config.config_file = Some(path);
        }

        // Environment variables override YAML config
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(raw) = std::env::var("GEMINI_TEMPERATURE") {
            let value = raw.parse::<f32>().map_err(|_| {
                AppError::Config(format!("GEMINI_TEMPERATURE is not a number: {}", raw))
            })?;
            config.temperature = Some(value);
        }

        if let Ok(raw) = std::env::var("GEMINI_MAX_TOKENS") {
            let value = raw.parse::<u32>().map_err(|_| {
                AppError::Config(format!("GEMINI_MAX_TOKENS is not a number: {}", raw))
            })?;
            config.max_output_tokens = Some(value);
        }

        if let Ok(endpoint) = std::env::var("STIRLING_PDF_URL") {
            config.extraction_endpoint = Some(endpoint);
        }

        if let Ok(key) = std::env::var("STIRLING_API_KEY") {
            config.extraction_api_key = Some(key);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &std::path::Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        // Merge generation settings
        if let Some(generation) = config_file.generation {
            if let Some(model) = generation.model {
                result.model = model;
            }
            if let Some(endpoint) = generation.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(env_name) = generation.api_key_env {
                if let Ok(key) = std::env::var(&env_name) {
                    result.api_key = Some(key);
                }
            }
            if let Some(temperature) = generation.temperature {
                result.temperature = Some(temperature);
            }
            if let Some(max_output_tokens) = generation.max_output_tokens {
                result.max_output_tokens = Some(max_output_tokens);
            }
        }

        // Merge extraction settings
        if let Some(extraction) = config_file.extraction {
            if let Some(endpoint) = extraction.endpoint {
                result.extraction_endpoint = Some(endpoint);
            }
            if let Some(env_name) = extraction.api_key_env {
                if let Ok(key) = std::env::var(&env_name) {
                    result.extraction_api_key = Some(key);
                }
            }
        }

        // Merge pipeline settings
        if let Some(pipeline) = config_file.pipeline {
            if let Some(chunk_size) = pipeline.chunk_size {
                result.chunk_size = chunk_size;
            }
            if let Some(max_concurrency) = pipeline.max_concurrency {
                result.max_concurrency = max_concurrency;
            }
            if let Some(template) = pipeline.template {
                result.template_file = Some(PathBuf::from(template));
            }
            if let Some(history) = pipeline.history {
                result.history = history;
            }
        }

        // Merge logging settings
        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over config file and environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        api_key: Option<String>,
        chunk_size: Option<usize>,
        max_concurrency: Option<usize>,
        temperature: Option<f32>,
        max_output_tokens: Option<u32>,
        template: Option<PathBuf>,
        no_history: bool,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(model) = model {
            self.model = model;
        }

        if let Some(api_key) = api_key {
            self.api_key = Some(api_key);
        }

        if let Some(chunk_size) = chunk_size {
            self.chunk_size = chunk_size;
        }

        if let Some(max_concurrency) = max_concurrency {
            self.max_concurrency = max_concurrency;
        }

        if let Some(temperature) = temperature {
            self.temperature = Some(temperature);
        }

        if let Some(max_output_tokens) = max_output_tokens {
            self.max_output_tokens = Some(max_output_tokens);
        }

        if let Some(template) = template {
            self.template_file = Some(template);
        }

        if no_history {
            self.history = false;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the configuration before running the pipeline.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config(
                "chunkSize must be greater than zero".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(AppError::Config(
                "maxConcurrency must be greater than zero".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("model must not be empty".to_string()));
        }

        if let Some(ref template) = self.template_file {
            if !template.exists() {
                return Err(AppError::Config(format!(
                    "Template file does not exist: {:?}",
                    template
                )));
            }
        }

        Ok(())
    }

    /// Resolve the generation API key, if any source provides one.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }
        std::env::var("GEMINI_API_KEY").ok()
    }
}
