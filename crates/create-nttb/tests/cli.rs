use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Return a `Command` for the `create-nttb` binary built by Cargo.
fn create_nttb() -> Command {
    cargo_bin_cmd!("create-nttb")
}

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .args([
            "-c",
            "user.name=Template",
            "-c",
            "user.email=template@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

/// A local template repository shaped like the create-nttb boilerplate
fn make_template_repo(root: &Path) -> std::path::PathBuf {
    let repo = root.join("template");
    fs::create_dir_all(repo.join(".github/workflows")).unwrap();
    fs::create_dir_all(repo.join("bin")).unwrap();
    fs::create_dir_all(repo.join("src/app")).unwrap();
    fs::write(repo.join(".github/workflows/ci.yml"), "on: push\n").unwrap();
    fs::write(repo.join("bin/create.ts"), "#!/usr/bin/env node\n").unwrap();
    fs::write(repo.join("renovate.json"), "{}\n").unwrap();
    fs::write(repo.join("tsconfig.cli.json"), "{}\n").unwrap();
    fs::write(repo.join("src/app/page.tsx"), "export default function Page() {}\n").unwrap();
    fs::write(
        repo.join("package.json"),
        r#"{"name":"create-nttb","version":"3.0.0","author":"a","bin":{"create-nttb":"bin/create.js"},"custom":123}"#,
    )
    .unwrap();

    git(&repo, &["init", "-q"]);
    git(&repo, &["add", "."]);
    git(&repo, &["commit", "-q", "-m", "template"]);
    repo
}

// ── Usage ───────────────────────────────────────────────────────────

#[test]
fn help_flag() {
    create_nttb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next.js"))
        .stdout(predicate::str::contains("--package-manager"))
        .stdout(predicate::str::contains("--skip-install"));
}

#[test]
fn version_flag() {
    create_nttb()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_project_name_shows_usage() {
    let tmp = tempdir().unwrap();
    create_nttb()
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please provide a name"))
        .stderr(predicate::str::contains("Usage"));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn blank_project_name_shows_usage() {
    let tmp = tempdir().unwrap();
    create_nttb()
        .current_dir(tmp.path())
        .arg("  ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please provide a name"));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn unknown_package_manager_is_rejected() {
    create_nttb()
        .args(["--package-manager", "cargo", "my-app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ── Destination conflicts ───────────────────────────────────────────

#[test]
fn non_empty_destination_fails_without_cloning() {
    let tmp = tempdir().unwrap();
    let project = tmp.path().join("my-app");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("stray.txt"), "stray").unwrap();

    create_nttb()
        .current_dir(tmp.path())
        .args(["--skip-checks", "--template"])
        .arg(tmp.path().join("no-such-template"))
        .arg("my-app")
        .assert()
        .code(1)
        .stderr(predicate::str::is_match("exists and is not empty").unwrap())
        .stderr(predicate::str::contains("Template clone").not());

    let entries: Vec<_> = fs::read_dir(&project)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, ["stray.txt"]);
}

#[test]
fn destination_that_is_a_file_fails() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("my-app"), "not a directory").unwrap();

    create_nttb()
        .current_dir(tmp.path())
        .args(["--skip-checks", "my-app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

// ── End to end (needs git) ──────────────────────────────────────────

#[test]
fn clones_local_template_and_cleans_it() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let tmp = tempdir().unwrap();
    let template = make_template_repo(tmp.path());
    let work = tmp.path().join("work");
    fs::create_dir(&work).unwrap();

    create_nttb()
        .current_dir(&work)
        .args(["--skip-install", "--template"])
        .arg(&template)
        .arg("my-app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installation complete"))
        .stdout(predicate::str::contains("cd my-app"));

    let project = work.join("my-app");
    for removed in [".git", ".github", "bin", "renovate.json", "tsconfig.cli.json"] {
        assert!(!project.join(removed).exists(), "{} should be removed", removed);
    }
    assert!(project.join("src/app/page.tsx").exists());

    let text = fs::read_to_string(project.join("package.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(manifest["name"], "my-app");
    assert_eq!(manifest["version"], "1.0.0");
    assert_eq!(manifest["custom"], 123);
    assert!(manifest.get("author").is_none());
    assert!(manifest.get("bin").is_none());
}
