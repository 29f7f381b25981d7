//! CLI integration tests
use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("seo-auditor");
    cmd.env_remove("GROQ_API_KEY").env_remove("RUST_LOG");
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn serve_fixture(server: &mut mockito::Server, path: &str, name: &str) -> mockito::Mock {
    let body = std::fs::read_to_string(get_fixture_path(name)).unwrap();
    server.mock("GET", path).with_status(200).with_body(body).create()
}

fn write_url_list(tmp: &TempDir, urls: &[String]) -> PathBuf {
    let path = tmp.path().join("urls.txt");
    std::fs::write(&path, urls.join("\n")).unwrap();
    path
}

#[test]
fn test_cli_basic_text_output() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/", "minimal.html");
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/", server.url())]);

    cmd()
        .arg("--no-ai")
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("SEO Report"))
        .stdout(predicate::str::contains("\"title\": \"Hi\""))
        .stdout(predicate::str::contains("AI Analysis").not())
        .stderr(predicate::str::contains("Found 1 URLs"));
}

#[test]
fn test_cli_json_lines() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/a", "minimal.html");
    let _mock = serve_fixture(&mut server, "/b", "article.html");
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/a", server.url()), format!("{}/b", server.url())]);

    let output = cmd().args(["--no-ai", "-f", "json"]).arg(&list).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout.lines().map(|line| serde_json::from_str(line).unwrap()).collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["report"]["metadata"]["title"], "Hi");
    assert_eq!(lines[1]["report"]["images"]["images_without_alt"], 2);
    assert!(lines[1]["analysis"].is_null());
}

#[test]
fn test_cli_full_mode() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/guides/coffee", "article.html");
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/guides/coffee", server.url())]);

    cmd()
        .args(["--no-ai", "-m", "full"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Page Headings summary\""))
        .stdout(predicate::str::contains("\"Input type\": \"URL with path\""));
}

#[test]
fn test_cli_stdin_input() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/", "minimal.html");

    cmd()
        .args(["--no-ai", "-f", "json", "-"])
        .write_stdin(format!("# pages\n{}/\n\n", server.url()))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":200"));
}

#[test]
fn test_cli_unreachable_url_does_not_fail() {
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &["http://127.0.0.1:1/".to_string(), "not a url".to_string()]);

    cmd()
        .args(["--no-ai", "-f", "json"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"error\":").count(2));
}

#[test]
fn test_cli_start_at() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/b", "minimal.html");
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &["http://127.0.0.1:1/".to_string(), format!("{}/b", server.url())]);

    cmd()
        .args(["--no-ai", "-f", "json", "--start-at", "1"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error\"").not())
        .stdout(predicate::str::contains("/b\""));
}

#[test]
fn test_cli_ai_analysis() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/", "minimal.html");
    let completion = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Add a meta description."}}]}"#)
        .create();
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/", server.url())]);

    cmd()
        .env("GROQ_API_KEY", "test-key")
        .args(["--api-base", &server.url()])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("AI Analysis"))
        .stdout(predicate::str::contains("Add a meta description."));

    completion.assert();
}

#[test]
fn test_cli_ai_failure_uses_sentinel() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/", "minimal.html");
    let _mock = server.mock("POST", "/chat/completions").with_status(500).create();
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/", server.url())]);

    cmd()
        .env("GROQ_API_KEY", "test-key")
        .args(["--api-base", &server.url(), "-f", "json"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error occurred during AI analysis."));
}

#[test]
fn test_cli_missing_api_key() {
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &["https://example.com".to_string()]);

    cmd()
        .current_dir(tmp.path())
        .arg(&list)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .args(["--no-ai", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read URL list"));
}

#[test]
fn test_cli_empty_list() {
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &["# nothing here".to_string()]);

    cmd()
        .arg("--no-ai")
        .arg(&list)
        .assert()
        .success()
        .stderr(predicate::str::contains("No URLs found"));
}

#[test]
fn test_cli_invalid_mode() {
    cmd().args(["--no-ai", "-m", "deep", "urls.txt"]).assert().failure();
}

#[test]
fn test_cli_verbose() {
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &["http://127.0.0.1:1/".to_string()]);

    cmd()
        .args(["--no-ai", "-v"])
        .arg(&list)
        .assert()
        .success()
        .stderr(predicate::str::contains("SEO Auditor"));
}

#[test]
fn test_cli_verbose_shows_configured_model() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/", "minimal.html");
    let _mock = server.mock("POST", "/chat/completions").with_status(500).create();
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/", server.url())]);

    cmd()
        .env("GROQ_API_KEY", "test-key")
        .args(["--api-base", &server.url(), "--model", "llama-test", "-v"])
        .arg(&list)
        .assert()
        .success()
        .stderr(predicate::str::contains("llama-test"))
        .stderr(predicate::str::contains("resume with").not());
}

#[test]
fn test_cli_timeout_zero_means_no_timeout() {
    let mut server = mockito::Server::new();
    let _mock = serve_fixture(&mut server, "/", "minimal.html");
    let tmp = TempDir::new().unwrap();
    let list = write_url_list(&tmp, &[format!("{}/", server.url())]);

    cmd()
        .args(["--no-ai", "-f", "json", "--timeout", "0"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":200"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seo-auditor"));
}

#[test]
fn test_cli_requires_input() {
    cmd().assert().failure();
}
