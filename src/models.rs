//! Data models for the investigation pipeline.
//!
//! This module contains all the core data structures used throughout
//! the application for representing targets, page features, risk
//! assessments, search evidence, and verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The subject of an investigation: a URL or a free-text query,
/// plus optional prior analysis and additional text context.
///
/// Immutable once constructed; created per incoming request and
/// owned by the request scope for the lifetime of the pipeline.
#[derive(Debug, Clone)]
pub struct InvestigationTarget {
    /// The URL or free-text query under investigation.
    pub query: String,
    /// Prior analysis text supplied alongside the query, if any.
    pub analysis: Option<String>,
    /// Additional text content supplied alongside the query, if any.
    pub other_text_content: Option<String>,
}

impl InvestigationTarget {
    /// Creates a target from a bare query with no prior context.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            analysis: None,
            other_text_content: None,
        }
    }
}

/// Result of the six heuristic checks run against a fetched page.
///
/// Only exists when a page was actually fetched and parsed; the
/// "no page" case is represented by `Option::None` at the call site
/// and maps to [`RiskLevel::Unknown`] in scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityFeatureSet {
    /// The target URL uses the HTTPS scheme.
    pub uses_https: bool,
    /// A `<footer>` element exists in the page.
    pub has_footer: bool,
    /// The page text contains an email, phone number, or street address.
    pub has_contact_info: bool,
    /// A form input's `name` attribute suggests sensitive data collection.
    pub has_sensitive_forms: bool,
    /// An anchor links to a known social media platform.
    pub has_social_media_link: bool,
    /// An anchor links to a privacy policy or terms page.
    pub has_privacy_policy: bool,
}

/// Risk category derived from the heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score 0-2.
    #[serde(rename = "Low risk")]
    Low,
    /// Score 3-5.
    #[serde(rename = "Medium risk")]
    Medium,
    /// Score 6 and above.
    #[serde(rename = "High risk")]
    High,
    /// The page could not be fetched; no heuristics were evaluated.
    /// Distinct from numeric Low.
    #[serde(rename = "Unable to analyze")]
    Unknown,
}

impl RiskLevel {
    /// Maps a heuristic score to its risk category.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=2 => RiskLevel::Low,
            3..=5 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low risk"),
            RiskLevel::Medium => write!(f, "Medium risk"),
            RiskLevel::High => write!(f, "High risk"),
            RiskLevel::Unknown => write!(f, "Unable to analyze"),
        }
    }
}

/// Heuristic score, risk category, and per-rule warnings for a target page.
///
/// Derived deterministically from a [`SecurityFeatureSet`] (or from its
/// absence) and never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Accumulated score across all fired rules.
    pub score: u32,
    /// Risk category mapped from the score.
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    /// Warning message for each rule that fired, in fixed rule order.
    pub explanations: Vec<String>,
}

/// One result item returned by the search capability.
///
/// All fields are optional; the search API omits them freely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub link: Option<String>,
}

/// A ranked list of result items for one data-source query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub items: Option<Vec<SearchResultItem>>,
}

impl SearchResult {
    /// Creates a result holding the given items.
    pub fn of(items: Vec<SearchResultItem>) -> Self {
        Self { items: Some(items) }
    }
}

/// The final output of an investigation.
#[derive(Debug, Clone, Serialize)]
pub struct InvestigationVerdict {
    /// The markdown report extracted from the analysis reply.
    pub result_text: String,
    /// The raw analysis reply, retained only when extraction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}
