#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{docfind_cmd, write_config};

/// Collection and search pages that answer but contain nothing.
async fn mount_empty_searches(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google_light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organic_results": []})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google_ai_mode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"references": []})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn run_writes_one_record_per_method() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let search = MockServer::start().await;
    let api_with_manifest = MockServer::start().await;
    let api_without_docs = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&api_with_manifest)
        .await;
    mount_empty_searches(&search).await;

    let config = write_config(dir.path(), &search.uri());
    let input = dir.path().join("methods.csv");
    fs::write(
        &input,
        format!(
            "name,method,method_link\n\
             Acme,List items,{}/v1/items\n\
             Beta,Get thing,{}/v2/things/1\n\
             Broken,Do thing,ftp://files.example.com/x\n",
            api_with_manifest.uri(),
            api_without_docs.uri()
        ),
    )?;

    docfind_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--input", "methods.csv", "--output", "out/results"])
        .args(["--api-key", "test-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 API methods"))
        .stdout(predicate::str::contains("✓ found for Acme List items"))
        .stdout(predicate::str::contains(
            "✗ error for Beta Get thing: No documentation found",
        ))
        .stdout(predicate::str::contains(
            "✗ error for Broken Do thing: No documentation found",
        ))
        .stdout(predicate::str::contains("Results saved to"));

    let json: Value = serde_json::from_str(&fs::read_to_string(
        dir.path().join("out").join("results.json"),
    )?)?;
    let records = json.as_array().expect("results array");
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["name"], "Acme");
    assert_eq!(
        records[0]["openapi_link"],
        format!("{}/openapi.json", api_with_manifest.uri())
    );
    assert_eq!(records[0]["search_method_name"], "");

    assert_eq!(records[1]["name"], "Beta");
    for field in [
        "openapi_link",
        "postman_link",
        "search_method_name",
        "search_method_link",
        "ai_method_name",
        "ai_method_link",
    ] {
        assert_eq!(records[1][field], "", "{field} should be empty");
        assert_eq!(records[2][field], "error", "{field} should be error");
    }
    assert_eq!(records[2]["method_link"], "error");

    let csv = fs::read_to_string(dir.path().join("out").join("results.csv"))?;
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with(
        "name,method,method_link,openapi_link,postman_link,search_method_name,search_method_link,ai_method_name,ai_method_link"
    ));
    Ok(())
}

#[tokio::test]
async fn run_reads_api_key_from_environment() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let search = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("api_key", "env-key"))
        .and(query_param("engine", "google_light"))
        .and(query_param("q", "Acme List items api documentation link"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [{
                "link": "https://docs.acme.dev/reference/items#list",
                "title": "Acme API - List items",
                "snippet": "List all items"
            }]
        })))
        .mount(&search)
        .await;
    mount_empty_searches(&search).await;

    let config = write_config(dir.path(), &search.uri());
    fs::write(
        dir.path().join("methods.json"),
        json!([{"name": "Acme", "method": "List items", "method_link": format!("{}/v1/items", api.uri())}])
            .to_string(),
    )?;

    docfind_cmd(dir.path())
        .env("DOCFIND_SEARCH_API_KEY", "env-key")
        .arg("--config")
        .arg(&config)
        .args(["run", "--input", "methods.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ found for Acme List items"));

    let json: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("results.json"))?)?;
    assert_eq!(
        json[0]["search_method_name"],
        "https://docs.acme.dev/reference/items#list"
    );
    assert_eq!(json[0]["ai_method_name"], "");
    Ok(())
}

#[test]
fn run_without_api_key_fails() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let config = write_config(dir.path(), "http://127.0.0.1:9");
    fs::write(
        dir.path().join("methods.csv"),
        "name,method,method_link\nAcme,List items,https://api.acme.dev/v1/items\n",
    )?;

    docfind_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--input", "methods.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search API key is not set"));

    assert!(!dir.path().join("results.csv").exists());
    Ok(())
}

#[test]
fn run_with_missing_input_fails() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    docfind_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--input", "absent.csv", "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading input file"));
    Ok(())
}

#[test]
fn run_with_no_valid_methods_fails() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let config = write_config(dir.path(), "http://127.0.0.1:9");
    fs::write(
        dir.path().join("methods.csv"),
        "name,method,method_link\nAcme,,\n",
    )?;

    docfind_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--input", "methods.csv", "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid API methods found"));
    Ok(())
}
