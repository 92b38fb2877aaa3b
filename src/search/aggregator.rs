//! Concurrent evidence gathering across all data sources.
//!
//! One search call per data source, all in flight at once. A failing
//! source is logged and contributes nothing; it never fails the
//! aggregation. The surviving results are flattened into
//! `"<title> | <snippet>"` lines joined by a separator.

use crate::models::{SearchResult, SearchResultItem};
use crate::search::{format_query, SearchBackend, DATA_SOURCES};
use futures::future::join_all;
use tracing::{debug, warn};

/// Separator between evidence entries in the combined bundle.
const EVIDENCE_SEPARATOR: &str = "\n---\n";

/// Fans a query out across the data-source table.
pub struct SearchAggregator<S: SearchBackend> {
    backend: S,
}

impl<S: SearchBackend> SearchAggregator<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Gathers evidence for a query from every data source concurrently.
    ///
    /// Always succeeds: sources that error are skipped with a warning,
    /// and zero successful sources yield an empty bundle.
    pub async fn gather(&self, query: &str) -> String {
        let searches = DATA_SOURCES.iter().map(|spec| {
            let formatted = format_query(spec, query);
            async move {
                match self.backend.search(&formatted).await {
                    Ok(result) => Some(result),
                    Err(e) => {
                        warn!("Search failed for data source {}: {:#}", spec.source, e);
                        None
                    }
                }
            }
        });

        let results: Vec<SearchResult> = join_all(searches).await.into_iter().flatten().collect();
        debug!(
            "Gathered results from {}/{} data sources",
            results.len(),
            DATA_SOURCES.len()
        );

        combine_formatted_results(&extract_evidence(&results))
    }
}

/// Flattens all items of all results into `"<title> | <snippet>"` strings.
///
/// Missing titles and snippets become empty strings; the item still
/// contributes a line.
fn extract_evidence(results: &[SearchResult]) -> Vec<String> {
    results
        .iter()
        .flat_map(|result| result.items.as_deref().unwrap_or_default())
        .map(format_item)
        .collect()
}

fn format_item(item: &SearchResultItem) -> String {
    let title = item.title.as_deref().unwrap_or("");
    let snippet = item.snippet.as_deref().unwrap_or("");
    format!("{} | {}", title, snippet)
}

/// Joins evidence lines with the separator; empty input yields an empty
/// string.
fn combine_formatted_results(formatted: &[String]) -> String {
    formatted.join(EVIDENCE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every call whose submission index is in `failing`.
    struct FlakyBackend {
        calls: AtomicUsize,
        failing: Vec<usize>,
        items: Vec<SearchResultItem>,
    }

    impl FlakyBackend {
        fn new(failing: Vec<usize>, items: Vec<SearchResultItem>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failing,
                items,
            }
        }
    }

    #[async_trait]
    impl SearchBackend for FlakyBackend {
        async fn search(&self, _query: &str) -> Result<SearchResult> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&index) {
                Err(anyhow!("quota exceeded"))
            } else {
                Ok(SearchResult::of(self.items.clone()))
            }
        }
    }

    fn item(title: Option<&str>, snippet: Option<&str>) -> SearchResultItem {
        SearchResultItem {
            title: title.map(String::from),
            snippet: snippet.map(String::from),
            link: None,
        }
    }

    #[test]
    fn test_format_item_coalesces_missing_fields() {
        assert_eq!(format_item(&item(Some("A"), Some("B"))), "A | B");
        assert_eq!(format_item(&item(None, Some("C"))), " | C");
        assert_eq!(format_item(&item(None, None)), " | ");
    }

    #[test]
    fn test_combine_empty_is_empty_string() {
        assert_eq!(combine_formatted_results(&[]), "");
    }

    #[test]
    fn test_flatten_and_join() {
        let results = vec![SearchResult::of(vec![
            item(Some("A"), Some("B")),
            item(None, Some("C")),
        ])];

        let combined = combine_formatted_results(&extract_evidence(&results));
        assert_eq!(combined, "A | B\n---\n | C");
    }

    #[test]
    fn test_result_without_items_contributes_nothing() {
        let results = vec![SearchResult::default(), SearchResult::of(vec![item(Some("A"), None)])];
        assert_eq!(extract_evidence(&results), vec!["A | ".to_string()]);
    }

    #[tokio::test]
    async fn test_gather_merges_all_sources() {
        let backend = FlakyBackend::new(vec![], vec![item(Some("T"), Some("S"))]);
        let aggregator = SearchAggregator::new(backend);

        let bundle = aggregator.gather("https://example.com").await;
        // Five sources, one item each.
        assert_eq!(bundle.matches("T | S").count(), 5);
        assert_eq!(bundle.matches(EVIDENCE_SEPARATOR).count(), 4);
    }

    #[tokio::test]
    async fn test_gather_survives_partial_failure() {
        let backend = FlakyBackend::new(vec![1, 3], vec![item(Some("T"), Some("S"))]);
        let aggregator = SearchAggregator::new(backend);

        let bundle = aggregator.gather("https://example.com").await;
        assert_eq!(bundle.matches("T | S").count(), 3);
    }

    #[tokio::test]
    async fn test_gather_with_all_sources_failing_is_empty() {
        let backend = FlakyBackend::new(vec![0, 1, 2, 3, 4], vec![]);
        let aggregator = SearchAggregator::new(backend);

        assert_eq!(aggregator.gather("anything").await, "");
    }
}
