//! Persisting results as CSV and JSON.
//!
//! This is the only place tagged outcomes become strings. Every URL column
//! holds a link, `""` (not attempted or nothing found) or `"error"`. A value
//! that is neither empty, `"error"` nor an absolute `http`/`https` URL with a
//! host is written as `"error"`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::Result;
use crate::types::{ERROR_SENTINEL, ProcessingResult};

/// One persisted row. Field order is the column order of both files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Service name.
    pub name: String,
    /// Method name.
    pub method: String,
    /// Example endpoint URL.
    pub method_link: String,
    /// Manifest link from direct probing.
    pub openapi_link: String,
    /// Collection link.
    pub postman_link: String,
    /// Light engine, name query.
    pub search_method_name: String,
    /// Light engine, URL query.
    pub search_method_link: String,
    /// AI engine, name query.
    pub ai_method_name: String,
    /// AI engine, URL query.
    pub ai_method_link: String,
}

impl From<&ProcessingResult> for ResultRecord {
    fn from(result: &ProcessingResult) -> Self {
        let descriptor = result.descriptor();
        let fields = result.fields();
        Self {
            name: descriptor.name.clone(),
            method: descriptor.method.clone(),
            method_link: validate_url(&descriptor.example_url),
            openapi_link: validate_url(fields.openapi_link.sentinel()),
            postman_link: validate_url(fields.postman_link.sentinel()),
            search_method_name: validate_url(fields.search_by_name.sentinel()),
            search_method_link: validate_url(fields.search_by_url.sentinel()),
            ai_method_name: validate_url(fields.ai_search_by_name.sentinel()),
            ai_method_link: validate_url(fields.ai_search_by_url.sentinel()),
        }
    }
}

/// Normalize a URL column value for persistence.
///
/// ```rust
/// use docfind_core::output::validate_url;
///
/// assert_eq!(validate_url(""), "");
/// assert_eq!(validate_url("error"), "error");
/// assert_eq!(validate_url("https://api.zoom.us/openapi.json"), "https://api.zoom.us/openapi.json");
/// assert_eq!(validate_url("/relative/path"), "error");
/// assert_eq!(validate_url("ftp://files.example.com/spec"), "error");
/// ```
#[must_use]
pub fn validate_url(value: &str) -> String {
    if value.is_empty() || value == ERROR_SENTINEL {
        return value.to_string();
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            value.to_string()
        },
        _ => ERROR_SENTINEL.to_string(),
    }
}

/// Write `{base}.csv` and `{base}.json`, one record per result, in order.
///
/// Returns the two paths written.
///
/// # Errors
///
/// Returns an error when either file cannot be created or written.
pub fn save_results(results: &[ProcessingResult], base: &Path) -> Result<(PathBuf, PathBuf)> {
    let records: Vec<ResultRecord> = results.iter().map(ResultRecord::from).collect();
    let csv_path = with_suffix(base, ".csv");
    let json_path = with_suffix(base, ".json");

    if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(&csv_path)?;
    if records.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    fs::write(&json_path, serde_json::to_string_pretty(&records)?)?;

    info!(
        csv = %csv_path.display(),
        json = %json_path.display(),
        count = records.len(),
        "saved results"
    );
    Ok((csv_path, json_path))
}

/// Read records back from a JSON results file.
pub fn load_records(path: &Path) -> Result<Vec<ResultRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

const CSV_HEADER: [&str; 9] = [
    "name",
    "method",
    "method_link",
    "openapi_link",
    "postman_link",
    "search_method_name",
    "search_method_link",
    "ai_method_name",
    "ai_method_link",
];

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}
