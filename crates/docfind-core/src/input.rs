//! Loading method descriptors from CSV or JSON files.
//!
//! Both formats carry the same three fields: `name`, `method` and
//! `method_link`. Rows or items with a missing or blank field are skipped with
//! a warning rather than failing the whole file; structural problems (no
//! header, wrong top-level JSON type, unknown extension) are errors.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::MethodDescriptor;
use crate::{Error, Result};

const REQUIRED_FIELDS: [&str; 3] = ["name", "method", "method_link"];

/// Load descriptors from `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a missing file, an unsupported
/// extension or a structurally invalid file, and [`Error::Parse`] for JSON
/// that does not parse.
pub fn load_descriptors(path: &Path) -> Result<Vec<MethodDescriptor>> {
    if !path.exists() {
        return Err(Error::InvalidInput(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let descriptors = match extension.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => {
            return Err(Error::InvalidInput(format!(
                "Unsupported input format '.{other}': expected .csv or .json"
            )));
        },
    };

    debug!(path = %path.display(), count = descriptors.len(), "loaded descriptors");
    Ok(descriptors)
}

fn load_csv(path: &Path) -> Result<Vec<MethodDescriptor>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::InvalidInput("CSV file is empty or has no header".into()));
    }

    let mut columns = [0usize; 3];
    let mut missing = Vec::new();
    for (slot, field) in columns.iter_mut().zip(REQUIRED_FIELDS) {
        match headers.iter().position(|h| h == field) {
            Some(index) => *slot = index,
            None => missing.push(field),
        }
    }
    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "CSV file missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut descriptors = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = record?;
        let [name, method, link] = columns.map(|i| record.get(i).unwrap_or("").trim());

        let blank: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .zip([name, method, link])
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !blank.is_empty() {
            warn!(line, missing = ?blank, "skipping CSV row with missing fields");
            continue;
        }

        descriptors.push(MethodDescriptor::new(name, method, link));
    }
    Ok(descriptors)
}

fn load_json(path: &Path) -> Result<Vec<MethodDescriptor>> {
    let content = fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&content)
        .map_err(|e| Error::Parse(format!("invalid JSON in {}: {e}", path.display())))?;

    let Value::Array(items) = data else {
        return Err(Error::InvalidInput(
            "JSON file must contain an array of objects".into(),
        ));
    };

    let mut descriptors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            warn!(index, "skipping JSON item that is not an object");
            continue;
        };

        let values = REQUIRED_FIELDS.map(|field| {
            object
                .get(field)
                .and_then(scalar_text)
                .unwrap_or_default()
        });
        let blank: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !blank.is_empty() {
            warn!(index, missing = ?blank, "skipping JSON item with missing fields");
            continue;
        }

        let [name, method, link] = values;
        descriptors.push(MethodDescriptor::new(name, method, link));
    }
    Ok(descriptors)
}

/// Trimmed text of a string, number or boolean value.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
