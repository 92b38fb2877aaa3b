//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.fraudlens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Page crawler settings.
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Search API settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Analysis backend settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Page crawler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Page fetch timeout in seconds.
    #[serde(default = "default_crawl_timeout")]
    pub timeout_seconds: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_crawl_timeout(),
        }
    }
}

fn default_crawl_timeout() -> u64 {
    10
}

/// Search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search API.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Search API key. Usually supplied via CLI flag or env var.
    #[serde(default)]
    pub api_key: String,

    /// Programmable search engine key.
    #[serde(default)]
    pub engine_key: String,

    /// Per-call search timeout in seconds.
    #[serde(default = "default_search_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            api_key: String::new(),
            engine_key: String::new(),
            timeout_seconds: default_search_timeout(),
        }
    }
}

fn default_search_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_search_timeout() -> u64 {
    10
}

/// Analysis backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Ollama API URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Analysis call timeout in seconds.
    #[serde(default = "default_analysis_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            ollama_url: default_ollama_url(),
            temperature: default_temperature(),
            timeout_seconds: default_analysis_timeout(),
        }
    }
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_analysis_timeout() -> u64 {
    120
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".fraudlens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Analysis settings - always override since they have defaults in CLI
        self.analysis.model = args.model.clone();
        self.analysis.ollama_url = args.ollama_url.clone();
        self.analysis.temperature = args.temperature;

        if let Some(timeout) = args.analysis_timeout {
            self.analysis.timeout_seconds = timeout;
        }

        // Search credentials - only override if provided
        if let Some(ref api_key) = args.search_api_key {
            self.search.api_key = api_key.clone();
        }
        if let Some(ref engine_key) = args.search_engine_key {
            self.search.engine_key = engine_key.clone();
        }
        if let Some(timeout) = args.search_timeout {
            self.search.timeout_seconds = timeout;
        }

        if let Some(timeout) = args.crawl_timeout {
            self.crawler.timeout_seconds = timeout;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
