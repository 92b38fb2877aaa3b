//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// FraudLens - LLM-powered scam, fraud and phishing investigator
///
/// Investigate any website URL or free-text query. FraudLens crawls the
/// target page and scores its trust signals, gathers corroborating
/// evidence from public search surfaces, and asks a local AI to produce
/// a cautious markdown verdict.
///
/// Examples:
///   fraudlens "https://too-good-deals.example"
///   fraudlens "cheap designer watches shop" --model mistral:7b
///   fraudlens "https://example.com" --crawl-only
///   fraudlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Website URL or free-text query to investigate
    ///
    /// Not required when using --init-config.
    #[arg(value_name = "QUERY", required_unless_present = "init_config")]
    pub query: Option<String>,

    /// Ollama model to use for the verdict
    ///
    /// Can also be set via FRAUDLENS_MODEL env var or .fraudlens.toml config.
    #[arg(short, long, default_value = "llama3.2:latest", env = "FRAUDLENS_MODEL")]
    pub model: String,

    /// Ollama API endpoint URL
    #[arg(long, default_value = "http://localhost:11434", env = "OLLAMA_URL")]
    pub ollama_url: String,

    /// Google Programmable Search API key
    #[arg(long, value_name = "KEY", env = "GOOGLE_SEARCH_API_KEY")]
    pub search_api_key: Option<String>,

    /// Google Programmable Search engine key (cx)
    #[arg(long, value_name = "KEY", env = "GOOGLE_SEARCH_ENGINE_KEY")]
    pub search_engine_key: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .fraudlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Temperature for LLM responses (0.0 - 1.0)
    ///
    /// Lower values produce more consistent/deterministic output
    #[arg(long, default_value = "0.1")]
    pub temperature: f32,

    /// Page fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub crawl_timeout: Option<u64>,

    /// Per-source search timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub search_timeout: Option<u64>,

    /// Analysis call timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub analysis_timeout: Option<u64>,

    /// Crawl and score the target without search or LLM calls
    ///
    /// Prints the heuristic risk assessment and exits.
    #[arg(long)]
    pub crawl_only: bool,

    /// Generate a default .fraudlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the query, falling back to empty (should be validated first).
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.query().trim().is_empty() {
            return Err("Query must not be empty".to_string());
        }

        // Validate Ollama URL format (not needed for crawl-only)
        if !self.crawl_only
            && !self.ollama_url.starts_with("http://")
            && !self.ollama_url.starts_with("https://")
        {
            return Err("Ollama URL must start with 'http://' or 'https://'".to_string());
        }

        // Validate temperature range
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 1.0".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeouts if provided
        for timeout in [self.crawl_timeout, self.search_timeout, self.analysis_timeout]
            .into_iter()
            .flatten()
        {
            if timeout == 0 {
                return Err("Timeouts must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
