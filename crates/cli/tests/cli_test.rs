//! Command line tests for the ansible-run binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_run_file(dir: &TempDir) -> std::path::PathBuf {
    let run_file = serde_json::json!({
        "settings": {"install_type": "system", "location": "/opt/ansible/bin/ansible"},
        "configurations": [
            {
                "name": "deps",
                "type": "galaxy",
                "requirements": "requirements.yml",
                "roles_dir": "roles",
                "collections": false
            },
            {
                "name": "site",
                "type": "playbook",
                "playbooks": ["site.yml"],
                "host": "web",
                "ask_become_pass": true
            }
        ]
    });
    let path = dir.path().join(".ansible-run.json");
    fs::write(&path, serde_json::to_string_pretty(&run_file).unwrap()).unwrap();
    path
}

#[test]
fn test_list() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_run_file(&temp_dir);

    Command::cargo_bin("ansible-run")
        .unwrap()
        .args(["list", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("galaxy"))
        .stdout(predicate::str::contains("deps"))
        .stdout(predicate::str::contains("site"));
}

#[test]
fn test_run_dry_run_galaxy() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_run_file(&temp_dir);

    Command::cargo_bin("ansible-run")
        .unwrap()
        .args(["run", "deps", "--dry-run", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("command: sh"))
        .stdout(predicate::str::contains(
            "/opt/ansible/bin/ansible-galaxy role install -r requirements.yml -p roles",
        ))
        .stdout(predicate::str::contains("ANSIBLE_ROLES_PATH=roles"))
        .stdout(predicate::str::contains("TERM=xterm-256color"));
}

#[test]
fn test_run_dry_run_with_password_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_run_file(&temp_dir);

    Command::cargo_bin("ansible-run")
        .unwrap()
        .args(["run", "site", "--dry-run", "--become-pass-stdin", "--file"])
        .arg(&path)
        .write_stdin("secret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit web --ask-become-pass site.yml"))
        .stdout(predicate::str::contains("stdin:"));
}

#[test]
fn test_run_missing_password() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_run_file(&temp_dir);

    Command::cargo_bin("ansible-run")
        .unwrap()
        .args(["run", "site", "--dry-run", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a become password"));
}

#[test]
fn test_run_unknown_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_run_file(&temp_dir);

    Command::cargo_bin("ansible-run")
        .unwrap()
        .args(["run", "nope", "--dry-run", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown run configuration: nope"));
}

#[cfg(unix)]
#[test]
fn test_run_with_non_utf8_environment() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let path = write_run_file(&temp_dir);

    Command::cargo_bin("ansible-run")
        .unwrap()
        .args(["run", "deps", "--dry-run", "--file"])
        .arg(&path)
        .env("ANSIBLE_RUN_LATIN1", OsStr::from_bytes(b"\xff\xfe"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ansible-galaxy role install"));
}
