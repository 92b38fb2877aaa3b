//! Page crawling and heuristic feature extraction.
//!
//! Given a target URL, fetch the page within a bounded timeout and run six
//! independent, side-effect-free checks against its text and DOM. A fetch
//! failure of any kind (bad URL, timeout, DNS, non-2xx) is absorbed here
//! and surfaces only as an absent snapshot; the pipeline must still
//! complete without a page.

use crate::models::SecurityFeatureSet;
use crate::urls::is_valid_url;
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

/// Form input name fragments that suggest sensitive data collection.
const SENSITIVE_FIELD_KEYWORDS: &[&str] = &[
    "credit_card",
    "bvn",
    "nin",
    "password",
    "ssn",
    "login",
    "accountnumber",
];

/// Domains whose presence in an anchor counts as a social media link.
const SOCIAL_MEDIA_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "youtube.com",
    "instagram.com",
    "x.com",
];

/// A fetched page reduced to what the pipeline needs: the check results
/// and the plain body text.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub features: SecurityFeatureSet,
    pub text_content: String,
}

/// External page-fetch capability: URL in, raw HTML out.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher with a fixed per-request timeout.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher whose requests time out after `timeout_seconds`.
    pub fn new(timeout_seconds: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status from {}", url))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))
    }
}

/// Crawls a target URL and extracts its security features.
pub struct PageCrawler<F: PageFetcher> {
    fetcher: F,
}

impl<F: PageFetcher> PageCrawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetches and inspects the target.
    ///
    /// Returns `None` when the target is not a URL or the page could not
    /// be fetched. Errors never propagate out of this method.
    pub async fn crawl(&self, target: &str) -> Option<PageSnapshot> {
        if !is_valid_url(target) {
            debug!("Target is not a crawlable URL: {}", target);
            return None;
        }

        match self.fetcher.fetch_page(target).await {
            Ok(html) => Some(extract_snapshot(target, &html)),
            Err(e) => {
                warn!("Failed to crawl {}: {:#}", target, e);
                None
            }
        }
    }
}

/// Parses the fetched HTML and runs all six feature checks.
///
/// Synchronous on purpose: the parsed DOM is not `Send`, so it must not
/// be held across an await point.
pub fn extract_snapshot(url: &str, html: &str) -> PageSnapshot {
    let document = Html::parse_document(html);
    let text_content = body_text(&document);

    let features = SecurityFeatureSet {
        uses_https: check_https(url),
        has_footer: check_footer(&document),
        has_contact_info: check_contact_info(&text_content),
        has_sensitive_forms: check_sensitive_forms(&document),
        has_social_media_link: check_social_media_links(&document),
        has_privacy_policy: check_privacy_policy_or_terms(&document),
    };

    PageSnapshot {
        features,
        text_content,
    }
}

/// Extracts the page's plain body text with collapsed whitespace.
fn body_text(document: &Html) -> String {
    let body = Selector::parse("body").expect("valid selector");

    let raw: String = match document.select(&body).next() {
        Some(element) => element.text().collect::<Vec<_>>().join(" "),
        None => String::new(),
    };

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The target is served over HTTPS.
fn check_https(url: &str) -> bool {
    url.starts_with("https")
}

/// A footer element exists in the page layout.
fn check_footer(document: &Html) -> bool {
    let footer = Selector::parse("footer").expect("valid selector");
    document.select(&footer).next().is_some()
}

/// The page text contains an email address, a phone number, or a street
/// address.
fn check_contact_info(text: &str) -> bool {
    let email = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("valid regex");
    let phone = Regex::new(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b").expect("valid regex");
    let address = Regex::new(r"\b\d+\s+[A-Za-z]+\s+(Street|Avenue|Road|Blvd|Lane)\b")
        .expect("valid regex");

    email.is_match(text) || phone.is_match(text) || address.is_match(text)
}

/// Any form input whose `name` attribute suggests sensitive data.
fn check_sensitive_forms(document: &Html) -> bool {
    let inputs = Selector::parse("form input[name]").expect("valid selector");

    document.select(&inputs).any(|input| {
        let name = input.value().attr("name").unwrap_or("").to_lowercase();
        SENSITIVE_FIELD_KEYWORDS
            .iter()
            .any(|keyword| name.contains(keyword))
    })
}

/// Any anchor pointing at a known social media platform.
fn check_social_media_links(document: &Html) -> bool {
    let anchors = Selector::parse("a[href]").expect("valid selector");

    document.select(&anchors).any(|anchor| {
        let href = anchor.value().attr("href").unwrap_or("").to_lowercase();
        SOCIAL_MEDIA_DOMAINS
            .iter()
            .any(|domain| href.contains(domain))
    })
}

/// Any anchor referencing a privacy policy or terms page.
fn check_privacy_policy_or_terms(document: &Html) -> bool {
    let anchors = Selector::parse("a[href*=privacy], a[href*=terms]").expect("valid selector");
    document.select(&anchors).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    const TRUSTED_PAGE: &str = include_str!("../../fixtures/trusted_page.html");
    const SUSPICIOUS_PAGE: &str = include_str!("../../fixtures/suspicious_page.html");

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            Err(anyhow!("connection refused: {}", url))
        }
    }

    #[test]
    fn test_trusted_page_features() {
        let snapshot = extract_snapshot("https://acmehardware.com", TRUSTED_PAGE);

        assert!(snapshot.features.uses_https);
        assert!(snapshot.features.has_footer);
        assert!(snapshot.features.has_contact_info);
        assert!(snapshot.features.has_social_media_link);
        assert!(snapshot.features.has_privacy_policy);
        assert!(!snapshot.features.has_sensitive_forms);
    }

    #[test]
    fn test_suspicious_page_features() {
        let snapshot = extract_snapshot("http://claim-your-prize.example", SUSPICIOUS_PAGE);

        assert!(!snapshot.features.uses_https);
        assert!(!snapshot.features.has_footer);
        assert!(!snapshot.features.has_contact_info);
        assert!(!snapshot.features.has_social_media_link);
        assert!(!snapshot.features.has_privacy_policy);
        assert!(snapshot.features.has_sensitive_forms);
    }

    #[test]
    fn test_body_text_is_flattened() {
        let snapshot = extract_snapshot("https://acmehardware.com", TRUSTED_PAGE);
        assert!(snapshot.text_content.contains("Family-owned since 1987"));
        assert!(!snapshot.text_content.contains('\n'));
    }

    #[test]
    fn test_contact_info_patterns() {
        assert!(check_contact_info("write to help@example.org today"));
        assert!(check_contact_info("call 123-456-7890 now"));
        assert!(check_contact_info("call 123 456 7890 now"));
        assert!(check_contact_info("our office: 456 Elm Road"));
        assert!(!check_contact_info("no contact details here"));
    }

    #[test]
    fn test_sensitive_form_matching_is_case_insensitive() {
        let html = r#"<form><input name="AccountNumber"></form>"#;
        let document = Html::parse_document(html);
        assert!(check_sensitive_forms(&document));
    }

    #[test]
    fn test_input_outside_form_is_ignored() {
        let html = r#"<div><input name="password"></div>"#;
        let document = Html::parse_document(html);
        assert!(!check_sensitive_forms(&document));
    }

    #[tokio::test]
    async fn test_crawl_rejects_non_url_targets() {
        let crawler = PageCrawler::new(StaticFetcher(TRUSTED_PAGE));
        assert!(crawler.crawl("is this shop legit").await.is_none());
    }

    #[tokio::test]
    async fn test_crawl_absorbs_fetch_failure() {
        let crawler = PageCrawler::new(FailingFetcher);
        assert!(crawler.crawl("http://example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_crawl_returns_snapshot() {
        let crawler = PageCrawler::new(StaticFetcher(SUSPICIOUS_PAGE));
        let snapshot = crawler.crawl("http://claim-your-prize.example").await;

        let snapshot = snapshot.expect("expected a snapshot");
        assert!(snapshot.features.has_sensitive_forms);
    }
}
