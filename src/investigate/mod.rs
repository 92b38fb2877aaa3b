//! Investigation orchestrator.
//!
//! Sequences the pipeline: validate the target, run the crawl/score
//! branch and the search fan-out concurrently, render the analysis
//! instruction, submit it to the analysis backend, and parse the reply.
//! The pipeline is strictly forward-progressing with no retries; only
//! invalid input and analysis failure are visible to the caller, every
//! other failure degrades to a less-informed verdict.

use crate::analysis::prompt::{parse_verdict, render_instruction};
use crate::analysis::AnalysisBackend;
use crate::crawler::{PageCrawler, PageFetcher};
use crate::models::{InvestigationTarget, InvestigationVerdict, RiskAssessment};
use crate::scoring::calculate_score;
use crate::search::aggregator::SearchAggregator;
use crate::search::SearchBackend;
use thiserror::Error;
use tracing::{debug, info};

/// Cap on the page text forwarded to the analysis capability, so a large
/// page cannot dominate the prompt.
const MAX_OTHER_CONTENT_CHARS: usize = 4000;

/// Failures visible to the caller. Everything else is absorbed inside
/// the pipeline.
#[derive(Debug, Error)]
pub enum InvestigationError {
    /// The target query was empty or blank. No external calls were made.
    #[error("Query must not be empty")]
    InvalidQuery,

    /// The analysis capability itself failed. Not retried.
    #[error("Investigation failed during analysis: {0}")]
    AnalysisFailed(anyhow::Error),
}

/// Runs investigations over the three external capabilities.
pub struct Investigator<F, S, A>
where
    F: PageFetcher,
    S: SearchBackend,
    A: AnalysisBackend,
{
    crawler: PageCrawler<F>,
    aggregator: SearchAggregator<S>,
    analysis: A,
}

impl<F, S, A> Investigator<F, S, A>
where
    F: PageFetcher,
    S: SearchBackend,
    A: AnalysisBackend,
{
    pub fn new(crawler: PageCrawler<F>, aggregator: SearchAggregator<S>, analysis: A) -> Self {
        Self {
            crawler,
            aggregator,
            analysis,
        }
    }

    /// Runs the heuristic crawl and scoring only, without search or
    /// analysis calls.
    pub async fn assess(&self, target: &str) -> RiskAssessment {
        let snapshot = self.crawler.crawl(target).await;
        calculate_score(snapshot.as_ref().map(|s| &s.features))
    }

    /// Runs the full investigation pipeline for a target.
    ///
    /// Fails only on an empty query or a failed analysis call. A page
    /// that cannot be fetched and search sources that error still
    /// produce a (less-informed) verdict.
    pub async fn investigate(
        &self,
        target: InvestigationTarget,
    ) -> Result<InvestigationVerdict, InvestigationError> {
        let query = target.query.trim();
        if query.is_empty() {
            return Err(InvestigationError::InvalidQuery);
        }

        info!("Investigating: {}", query);

        // The crawl/score branch and the search fan-out are independent;
        // both must complete before the instruction is rendered.
        let (snapshot, evidence) =
            tokio::join!(self.crawler.crawl(query), self.aggregator.gather(query));

        let assessment = calculate_score(snapshot.as_ref().map(|s| &s.features));
        debug!(
            "Heuristic assessment: score {} ({})",
            assessment.score, assessment.risk_level
        );

        let analysis_text = match target.analysis {
            Some(prior) => prior,
            None => serde_json::to_string(&assessment).unwrap_or_default(),
        };

        let other_content = target
            .other_text_content
            .or_else(|| snapshot.map(|s| truncate_chars(&s.text_content, MAX_OTHER_CONTENT_CHARS)))
            .unwrap_or_default();

        let instruction = render_instruction(query, &evidence, &analysis_text, &other_content);

        let reply = self
            .analysis
            .analyse(&instruction)
            .await
            .map_err(InvestigationError::AnalysisFailed)?;

        Ok(parse_verdict(&reply))
    }
}

/// Truncates on a character boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
