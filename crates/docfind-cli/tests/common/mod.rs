#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a `docfind` command isolated from the caller's environment.
///
/// Runs inside `dir` so no stray `.env` is picked up, with colors off and no
/// API key unless the test passes one.
#[allow(dead_code)]
pub fn docfind_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docfind"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("DOCFIND_SEARCH_API_KEY");
    cmd.env_remove("SERPAPI_KEY");
    cmd.env_remove("DOCFIND_CONFIG");
    cmd
}

/// Write a config file pointing both search endpoints at `server_uri`.
#[allow(dead_code)]
pub fn write_config(dir: &Path, server_uri: &str) -> PathBuf {
    let path = dir.join("docfind.toml");
    let content = format!(
        "[search]\n\
         endpoint = \"{server_uri}/search.json\"\n\
         \n\
         [collection]\n\
         endpoint = \"{server_uri}/collections\"\n\
         \n\
         [transport]\n\
         max_concurrent = 4\n\
         request_timeout_secs = 5\n\
         \n\
         [pipeline]\n\
         method_timeout_secs = 20\n"
    );
    fs::write(&path, content).expect("write config");
    path
}
