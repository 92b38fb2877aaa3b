//! Multi-source search: data-source specs and query formatting.
//!
//! Evidence is gathered from a fixed, ordered set of search surfaces. Each
//! surface carries a two-placeholder query pattern (query, keywords) and a
//! flag saying whether the pattern already restricts results to one site.
//! The set is static configuration; nothing is registered at runtime.

pub mod aggregator;
pub mod google;

use crate::models::SearchResult;
use crate::urls::{is_valid_url, sanitized_host};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

/// Keywords appended to every evidence query.
pub const INVESTIGATION_KEYWORDS: &str = "scam OR fraud OR phishing";

/// The search surfaces queried for corroborating evidence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    General,
    Facebook,
    X,
    Reddit,
    YouTube,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::General => write!(f, "General"),
            DataSource::Facebook => write!(f, "Facebook"),
            DataSource::X => write!(f, "X"),
            DataSource::Reddit => write!(f, "Reddit"),
            DataSource::YouTube => write!(f, "YouTube"),
        }
    }
}

/// One data source's query pattern and site-specificity flag.
#[derive(Debug, Clone, Copy)]
pub struct DataSourceSpec {
    pub source: DataSource,
    /// Two-placeholder pattern: first the query, then the keywords.
    pub pattern: &'static str,
    /// True when the pattern already embeds a `site:` operator.
    pub site_specific: bool,
}

/// The fixed, ordered data-source table.
pub const DATA_SOURCES: [DataSourceSpec; 5] = [
    DataSourceSpec {
        source: DataSource::General,
        pattern: "{} {}",
        site_specific: false,
    },
    DataSourceSpec {
        source: DataSource::Facebook,
        pattern: "site:facebook.com {} {}",
        site_specific: true,
    },
    DataSourceSpec {
        source: DataSource::X,
        pattern: "site:x.com {} {}",
        site_specific: true,
    },
    DataSourceSpec {
        source: DataSource::Reddit,
        pattern: "site:reddit.com {} {}",
        site_specific: true,
    },
    DataSourceSpec {
        source: DataSource::YouTube,
        pattern: "site:youtube.com {} {}",
        site_specific: true,
    },
];

/// Builds the formatted query for one data source.
///
/// Site-specific sources use the query as-is, since their pattern already
/// restricts results to one platform. For the general source, a URL query
/// gets a `site:<host>` prefix so results are scoped to the target site;
/// free-text queries pass through unprefixed.
pub fn format_query(spec: &DataSourceSpec, query: &str) -> String {
    let prefix = if spec.site_specific || !is_valid_url(query) {
        String::new()
    } else {
        match sanitized_host(query) {
            Some(host) => format!("site:{} ", host),
            None => String::new(),
        }
    };

    apply_pattern(spec.pattern, &format!("{}{}", prefix, query), INVESTIGATION_KEYWORDS)
}

/// Substitutes the two `{}` placeholders of a query pattern in order.
fn apply_pattern(pattern: &str, query: &str, keywords: &str) -> String {
    pattern.replacen("{}", query, 1).replacen("{}", keywords, 1)
}

/// External keyed-search capability: formatted query in, ranked items out.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResult>;
}
