//! FraudLens - AI-powered scam, fraud and phishing investigator
//!
//! A CLI tool that crawls a target website, scores its trust signals,
//! gathers corroborating evidence from public search surfaces, and uses
//! Ollama to synthesize a cautious markdown verdict.
//!
//! Exit codes:
//!   0 - Success (a verdict or assessment was produced)
//!   1 - Runtime error (invalid input, connection, analysis failure)

mod analysis;
mod cli;
mod config;
mod crawler;
mod investigate;
mod models;
mod scoring;
mod search;
mod urls;

use analysis::ollama::{OllamaClient, OllamaConfig};
use analysis::prompt;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use crawler::{HttpPageFetcher, PageCrawler};
use indicatif::{ProgressBar, ProgressStyle};
use investigate::Investigator;
use models::{InvestigationTarget, InvestigationVerdict, RiskAssessment};
use search::aggregator::SearchAggregator;
use search::google::GoogleSearchClient;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("FraudLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the investigation
    match run_investigation(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Investigation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .fraudlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".fraudlens.toml");

    if path.exists() {
        eprintln!("⚠️  .fraudlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .fraudlens.toml")?;

    println!("✅ Created .fraudlens.toml with default settings.");
    println!("   Edit it to set your search API keys, model, and timeouts.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete investigation workflow.
async fn run_investigation(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // A template regression would silently shift slot meaning; refuse to run.
    prompt::validate_template()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Instruction template is invalid")?;

    let query = args.query().to_string();

    let crawler = PageCrawler::new(HttpPageFetcher::new(config.crawler.timeout_seconds));
    let aggregator = SearchAggregator::new(GoogleSearchClient::new(
        config.search.base_url.clone(),
        config.search.api_key.clone(),
        config.search.engine_key.clone(),
        config.search.timeout_seconds,
    ));
    let ollama = OllamaClient::new(OllamaConfig {
        url: config.analysis.ollama_url.clone(),
        model: config.analysis.model.clone(),
        temperature: config.analysis.temperature,
        timeout_seconds: config.analysis.timeout_seconds,
    });

    let investigator = Investigator::new(crawler, aggregator, ollama);

    // Crawl-only mode: heuristics without search or LLM calls.
    if args.crawl_only {
        println!("🔍 Crawling: {}", query);
        let assessment = investigator.assess(&query).await;
        return output_assessment(&args, &query, &assessment);
    }

    if config.search.api_key.is_empty() || config.search.engine_key.is_empty() {
        warn!("Search API keys are not set; evidence gathering will come up empty");
    }

    println!("🔍 Investigating: {}", query);
    println!("   Model: {}", config.analysis.model);
    println!("   Ollama: {}", config.analysis.ollama_url);

    let spinner = make_spinner(args.quiet);
    let result = investigator
        .investigate(InvestigationTarget::new(query.clone()))
        .await;
    spinner.finish_and_clear();

    let verdict = result?;
    output_verdict(&args, &query, &verdict)
}

/// Create a progress spinner, hidden in quiet mode.
fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message("Gathering evidence and analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print or save the final verdict.
fn output_verdict(args: &Args, query: &str, verdict: &InvestigationVerdict) -> Result<()> {
    let output = match args.format {
        OutputFormat::Markdown => {
            if verdict.result_text.is_empty() {
                warn!("Analysis reply could not be parsed into a report");
            }
            verdict.result_text.clone()
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "query": query,
                "generated_at": Utc::now(),
                "result": verdict.result_text,
                "raw_response": verdict.raw_response,
            });
            serde_json::to_string_pretty(&report)?
        }
    };

    write_output(args, &output)?;
    println!("\n✅ Investigation complete.");
    Ok(())
}

/// Print or save a crawl-only risk assessment.
fn output_assessment(args: &Args, query: &str, assessment: &RiskAssessment) -> Result<()> {
    let output = match args.format {
        OutputFormat::Markdown => {
            let mut lines = vec![
                format!("# Risk assessment for {}", query),
                String::new(),
                format!("- Score: {}", assessment.score),
                format!("- Risk level: {}", assessment.risk_level),
            ];

            if !assessment.explanations.is_empty() {
                lines.push(String::new());
                lines.push("## Warnings".to_string());
                for explanation in &assessment.explanations {
                    lines.push(format!("- {}", explanation));
                }
            }

            lines.join("\n")
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "query": query,
                "generated_at": Utc::now(),
                "assessment": assessment,
            });
            serde_json::to_string_pretty(&report)?
        }
    };

    write_output(args, &output)
}

/// Write to --output if given, otherwise stdout.
fn write_output(args: &Args, output: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📝 Report saved to: {}", path.display());
        }
        None => {
            println!("\n{}", output);
        }
    }
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .fraudlens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
