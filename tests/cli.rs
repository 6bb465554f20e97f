//! CLI integration tests: run the built binary against temporary config dirs.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_portfolio-site"))
        .arg("--config-dir")
        .arg(dir.path())
        .args(args)
        .output()
        .expect("failed to run portfolio-site")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const ONE_REPO: &str = r##"
[repos.tools]
title = "Tools"
description = "Small utilities"
technologies = ["Rust"]
features = ["Fast"]
github_url = "https://github.com/me/tools"
live_url = "https://me.example.com/tools"

[repos.tools.stats]
commits = "12"
files = "4"
languages = "1"
size = "40 KB"
"##;

// =========================================================================
// catalog / render
// =========================================================================

#[test]
fn catalog_lists_builtin_repositories() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["catalog"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("(portfolio)"));
    assert!(out.contains("(open-source)"));
    assert!(out.lines().any(|l| l.starts_with("006 ")));
}

#[test]
fn catalog_reads_catalog_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("catalog.toml"), ONE_REPO).unwrap();

    let out = stdout(&run(&dir, &["catalog"]));
    assert!(out.starts_with("001 Tools (tools)"));
    assert!(!out.contains("(portfolio)"));
}

#[test]
fn render_prints_detail_panel() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["render", "portfolio"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let html = stdout(&output);
    assert!(html.contains(r#"<div class="repo-header">"#));
    assert!(html.contains("Personal Portfolio"));
    assert!(html.contains(r#"class="back-btn""#));
}

#[test]
fn render_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["render", "blog"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no repository 'blog'"));
}

// =========================================================================
// gen-config / check
// =========================================================================

#[test]
fn gen_config_round_trips_to_defaults() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["gen-config"]);
    assert!(output.status.success());

    let config = portfolio_site::config::config_from_str(&stdout(&output)).unwrap();
    assert_eq!(config.router.return_section, "projects");
    assert_eq!(config.form.message_timeout_ms, 5000);
}

#[test]
fn check_accepts_defaults() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["check"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("6 repositories"));
    assert!(out.contains("==> Configuration is valid"));
}

#[test]
fn check_generated_config_file() {
    let dir = TempDir::new().unwrap();
    let generated = stdout(&run(&dir, &["gen-config"]));
    fs::write(dir.path().join("config.toml"), generated).unwrap();
    fs::write(dir.path().join("catalog.toml"), ONE_REPO).unwrap();

    let output = run(&dir, &["check"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("1 repository"));
}

#[test]
fn check_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[router]\nreturn_section = \"about\"\n",
    )
    .unwrap();

    let output = run(&dir, &["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("return_section"));
}

#[test]
fn check_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[form]\nretries = 3\n").unwrap();

    assert!(!run(&dir, &["check"]).status.success());
}

// =========================================================================
// send
// =========================================================================

#[test]
fn send_with_invalid_email_makes_no_request() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &dir,
        &[
            "send",
            "--name",
            "Rahim",
            "--email",
            "not-an-email",
            "--subject",
            "Hi",
            "--message",
            "Hello",
            "--endpoint",
            "http://127.0.0.1:9/unused",
        ],
    );

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("✗ Please enter a valid email address."));
    assert!(!out.contains("Sending..."));
}

#[test]
fn send_with_empty_name_reports_missing_field() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &dir,
        &[
            "send",
            "--name",
            "  ",
            "--email",
            "a@b.co",
            "--subject",
            "Hi",
            "--message",
            "Hello",
        ],
    );

    assert!(!output.status.success());
    assert!(stdout(&output).contains("✗ Please fill in all required fields."));
}

#[test]
fn send_without_endpoint_fails_before_sending() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &dir,
        &[
            "send",
            "--name",
            "Rahim",
            "--email",
            "a@b.co",
            "--subject",
            "Hi",
            "--message",
            "Hello",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no form endpoint"));
    assert!(!stdout(&output).contains("Sending..."));
}
