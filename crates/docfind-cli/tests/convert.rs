#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;

mod common;
use common::docfind_cmd;

fn record(name: &str, method: &str, openapi: &str, postman: &str, web: &str) -> Value {
    json!({
        "name": name,
        "method": method,
        "method_link": "https://api.zoom.us/v2/users/me/meetings",
        "openapi_link": openapi,
        "postman_link": postman,
        "search_method_name": web,
        "search_method_link": "",
        "ai_method_name": "error",
        "ai_method_link": ""
    })
}

#[test]
fn convert_writes_tracker_entries() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let results = json!([
        record("Zoom", "Create meeting", "https://api.zoom.us/swagger.json", "", ""),
        record("Slack", "Post message", "error", "https://www.postman.com/slack/collection/1", ""),
        record("Stripe", "Create charge", "", "", "https://docs.stripe.com/api/charges/create"),
        record("Nothing", "Missing", "", "error", ""),
    ]);
    fs::write(dir.path().join("results.json"), results.to_string())?;

    docfind_cmd(dir.path())
        .args(["convert", "results.json", "--output", "urls.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 3 entries from 4 results"));

    let entries: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("urls.json"))?)?;
    let entries = entries.as_array().expect("entries array");
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0]["type"], "openapi");
    assert_eq!(entries[0]["method_filter"], "/v2/users/me/meetings");
    assert_eq!(entries[0]["name"], "Zoom API - Create meeting");

    assert_eq!(entries[1]["type"], "postman");
    assert!(entries[1].get("method_filter").is_none());

    assert_eq!(entries[2]["type"], "html");
    assert_eq!(entries[2]["url"], "https://docs.stripe.com/api/charges/create");
    Ok(())
}

#[test]
fn convert_missing_results_fails() -> anyhow::Result<()> {
    let dir = tempdir()?;

    docfind_cmd(dir.path())
        .args(["convert", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read results"));
    Ok(())
}
