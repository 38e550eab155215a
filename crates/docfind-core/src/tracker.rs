//! Conversion of saved results into documentation-tracker entries.
//!
//! A tracker watches one documentation URL per method. For every result the
//! most useful link is chosen: a manifest first, then a collection, then the
//! most specific of the four web-search links.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::Result;
use crate::output::ResultRecord;
use crate::types::ERROR_SENTINEL;

/// Kind of document a tracker entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Machine-readable OpenAPI/Swagger document.
    Openapi,
    /// Request collection.
    Postman,
    /// Human-readable page.
    Html,
}

/// One monitored documentation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEntry {
    /// Documentation URL.
    pub url: String,
    /// Document kind.
    #[serde(rename = "type")]
    pub doc_type: DocType,
    /// Display name, `"{name} API - {method}"`.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Path of the example URL, for narrowing an OpenAPI document to one method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_filter: Option<String>,
}

const MANIFEST_EXTENSIONS: &[&str] = &[".json", ".yaml", ".yml"];

const GENERIC_SUFFIXES: &[&str] = &[
    "/docs",
    "/documentation",
    "/api",
    "/reference",
    "/guide",
    "/methods/",
    "/api/",
];

const LOW_QUALITY_HOSTS: &[&str] = &["stackoverflow.com", "medium.com", "community.", "forum."];

const DOC_HOST_MARKERS: &[&str] = &["developers.", "docs.", "api.", "dev."];

/// Convert result records into tracker entries, dropping records without a
/// usable link. Input order is preserved.
#[must_use]
pub fn convert_results(records: &[ResultRecord]) -> Vec<TrackerEntry> {
    let entries: Vec<TrackerEntry> = records.iter().filter_map(convert_record).collect();
    info!(
        converted = entries.len(),
        total = records.len(),
        "converted results to tracker entries"
    );
    entries
}

fn convert_record(record: &ResultRecord) -> Option<TrackerEntry> {
    let (url, doc_type) = if let Some(link) = usable(&record.openapi_link) {
        let lower = link.to_lowercase();
        let doc_type = if MANIFEST_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            DocType::Openapi
        } else {
            DocType::Html
        };
        (link, doc_type)
    } else if let Some(link) = usable(&record.postman_link) {
        (link, DocType::Postman)
    } else {
        let mut best: Option<(i32, &str)> = None;
        for link in [
            &record.search_method_name,
            &record.search_method_link,
            &record.ai_method_name,
            &record.ai_method_link,
        ]
        .into_iter()
        .filter_map(|l| usable(l))
        {
            let score = specificity(link, &record.method);
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, link));
            }
        }
        let (_, link) = best?;
        (link, DocType::Html)
    };

    let method_filter = (doc_type == DocType::Openapi)
        .then(|| Url::parse(&record.method_link).ok())
        .flatten()
        .map(|u| u.path().to_string())
        .filter(|p| !p.is_empty());

    debug!(name = %record.name, method = %record.method, url, "tracker entry");
    Some(TrackerEntry {
        url: url.to_string(),
        doc_type,
        name: format!("{} API - {}", record.name, record.method),
        description: format!(
            "Documentation monitoring for method {} in {}",
            record.method, record.name
        ),
        method_filter,
    })
}

fn usable(link: &str) -> Option<&str> {
    (!link.is_empty() && link != ERROR_SENTINEL).then_some(link)
}

/// How specific `url` looks for a method; higher is better.
#[must_use]
pub fn specificity(url: &str, method: &str) -> i32 {
    let lower = url.to_lowercase();
    let mut score = 0;

    if url.contains('#') {
        score += 100;
    }

    let method = method.to_lowercase();
    for word in method.split_whitespace().filter(|w| w.chars().count() > 3) {
        if lower.contains(word) {
            score += 30;
        }
    }

    for suffix in GENERIC_SUFFIXES {
        if lower.ends_with(suffix) {
            score -= 50;
        }
    }

    if LOW_QUALITY_HOSTS.iter().any(|h| lower.contains(h)) {
        score -= 30;
    }

    if DOC_HOST_MARKERS.iter().any(|m| lower.contains(m)) {
        score += 20;
    }

    let segments = Url::parse(url)
        .map(|u| u.path().split('/').filter(|s| !s.is_empty()).count())
        .unwrap_or(0);
    if segments >= 4 {
        score += 40;
    } else if segments >= 3 {
        score += 20;
    }

    score
}

/// Write tracker entries as a pretty JSON array.
pub fn save_entries(entries: &[TrackerEntry], path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, method: &str) -> ResultRecord {
        ResultRecord {
            name: name.into(),
            method: method.into(),
            method_link: "https://api.zoom.us/v2/users/me/meetings".into(),
            openapi_link: String::new(),
            postman_link: String::new(),
            search_method_name: String::new(),
            search_method_link: String::new(),
            ai_method_name: String::new(),
            ai_method_link: String::new(),
        }
    }

    #[test]
    fn test_manifest_takes_priority_with_method_filter() {
        let mut r = record("Zoom", "Create meeting");
        r.openapi_link = "https://api.zoom.us/swagger.json".into();
        r.postman_link = "https://www.postman.com/zoom/collection/1".into();

        let entries = convert_results(&[r]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].doc_type, DocType::Openapi);
        assert_eq!(entries[0].url, "https://api.zoom.us/swagger.json");
        assert_eq!(entries[0].method_filter.as_deref(), Some("/v2/users/me/meetings"));
        assert_eq!(entries[0].name, "Zoom API - Create meeting");
        assert_eq!(
            entries[0].description,
            "Documentation monitoring for method Create meeting in Zoom"
        );
    }

    #[test]
    fn test_non_manifest_openapi_link_is_html() {
        let mut r = record("Zoom", "Create meeting");
        r.openapi_link = "https://api.zoom.us/redoc".into();

        let entries = convert_results(&[r]);
        assert_eq!(entries[0].doc_type, DocType::Html);
        assert_eq!(entries[0].method_filter, None);
    }

    #[test]
    fn test_collection_used_when_no_manifest() {
        let mut r = record("Zoom", "Create meeting");
        r.openapi_link = "error".into();
        r.postman_link = "https://www.postman.com/zoom/collection/1".into();

        let entries = convert_results(&[r]);
        assert_eq!(entries[0].doc_type, DocType::Postman);
    }

    #[test]
    fn test_most_specific_web_link_wins() {
        let mut r = record("Zoom", "Create meeting");
        r.search_method_name = "https://zoom.us/docs".into();
        r.search_method_link = "error".into();
        r.ai_method_name =
            "https://developers.zoom.us/docs/api/meetings/#tag/meetings/POST/users/{userId}/meetings"
                .into();
        r.ai_method_link = "https://stackoverflow.com/questions/1/create-meeting".into();

        let entries = convert_results(&[r]);
        assert_eq!(entries[0].doc_type, DocType::Html);
        assert!(entries[0].url.starts_with("https://developers.zoom.us/docs/api/meetings/"));
    }

    #[test]
    fn test_records_without_links_are_dropped() {
        let mut failed = record("Broken", "Do thing");
        failed.openapi_link = "error".into();
        failed.ai_method_link = "error".into();

        assert!(convert_results(&[record("Zoom", "Create meeting"), failed]).is_empty());
    }

    #[test]
    fn test_specificity_scores() {
        // fragment, "meeting" word, docs host, 4+ segments
        assert_eq!(
            specificity("https://developers.zoom.us/docs/api/rest/meeting#create", "Create meeting"),
            100 + 30 + 30 + 20 + 40
        );
        // generic suffix
        assert_eq!(specificity("https://zoom.us/docs", "Create meeting"), -50);
        // forum host with three segments
        assert_eq!(
            specificity("https://community.zoom.com/t5/api/123", "List users"),
            -30 + 20
        );
    }

    #[test]
    fn test_save_entries_omits_missing_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("urls.json");
        let mut r = record("Zoom", "Create meeting");
        r.postman_link = "https://www.postman.com/zoom/collection/1".into();

        save_entries(&convert_results(&[r]), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""type": "postman""#));
        assert!(!written.contains("method_filter"));
    }
}
