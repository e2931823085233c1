//! End-to-end CLI tests driving the `folio` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn folio() -> Command {
    Command::cargo_bin("folio").unwrap()
}

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

// ── inspect ───────────────────────────────────────────────────────────────────

#[test]
fn inspect_prints_parsed_pieces() {
    folio()
        .args(["inspect", "shared/_header.html.iphone.erb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base name:  _header"))
        .stdout(predicate::str::contains("Format:     html.iphone"))
        .stdout(predicate::str::contains("Extension:  erb"))
        .stdout(predicate::str::contains("Partial:    yes"))
        .stdout(predicate::str::contains("Resolved:   (not found)"));
}

#[test]
fn inspect_resolves_against_the_search_path() {
    let dir = fixture(&[("shared/_header.html.erb", "<h1>hi</h1>")]);

    folio()
        .args(["inspect", "shared/_header.html.erb", "-t"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved:   "))
        .stdout(predicate::str::contains("_header.html.erb"));
}

#[test]
fn inspect_json_is_machine_readable() {
    let output = folio()
        .args(["inspect", "show.html.erb", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["parts"]["base_name"], "show");
    assert_eq!(payload["parts"]["format"], "html");
    assert_eq!(payload["parts"]["extension"], "erb");
    assert_eq!(payload["resolved"], serde_json::Value::Null);
}

#[test]
fn inspect_surfaces_a_compile_failure_instead_of_calling_it_missing() {
    let dir = fixture(&[("broken.html.erb", "oops {{unclosed")]);

    folio()
        .args(["inspect", "broken.html.erb", "-t"])
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed to compile"))
        .stdout(predicate::str::contains("(not found)").not());
}

#[test]
fn inspect_rejects_a_malformed_path_with_exit_2() {
    folio()
        .args(["inspect", "a.b.c.d.e"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("malformed template path"));
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_substitutes_locals() {
    let dir = fixture(&[("index.html.erb", "<h1>{{title}}</h1>")]);

    folio()
        .args(["render", "index.html.erb", "--set", "title=Home", "-t"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Home</h1>"));
}

#[test]
fn render_partial_binds_the_object() {
    let dir = fixture(&[("_account.html.erb", "acct={{account}} obj={{object}}")]);

    folio()
        .args([
            "render",
            "account.html.erb",
            "--partial",
            "--object",
            "\"acme\"",
            "-t",
        ])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acct=acme obj=acme"));
}

#[test]
fn render_missing_template_exits_3_and_lists_directories() {
    let dir = fixture(&[]);

    folio()
        .args(["render", "nope.html.erb", "-t"])
        .arg(dir.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn render_rejects_a_bad_set_pair_with_exit_2() {
    folio()
        .args(["render", "x.html.erb", "--set", "title"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid local binding"));
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_reports_templates_and_partials() {
    let dir = fixture(&[
        ("index.html.erb", ""),
        ("shared/_header.html.erb", ""),
    ]);

    folio()
        .args(["list", "-t"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html.erb"))
        .stdout(predicate::str::contains("shared/_header.html.erb"))
        .stdout(predicate::str::contains("2 template(s)"));
}

#[test]
fn list_partials_only_filters() {
    let dir = fixture(&[
        ("index.html.erb", ""),
        ("shared/_header.html.erb", ""),
    ]);

    folio()
        .args(["list", "--partials", "-t"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("_header.html.erb"))
        .stdout(predicate::str::contains("index.html.erb").not());
}

#[test]
fn list_with_no_matches_says_so() {
    let dir = fixture(&[]);

    folio()
        .args(["list", "-t"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates found"));
}
