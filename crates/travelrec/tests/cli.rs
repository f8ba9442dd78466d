//! Tests that run the `travrec` binary against a temporary agency.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// A config file and data directory in a temporary directory.
struct Agency {
    dir: tempfile::TempDir,
    config: PathBuf,
}

impl Agency {
    fn new() -> Self {
        Self::with_agent("admin", "admin")
    }

    fn with_agent(username: &str, password: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let data_dir = dir.path().join("data");
        std::fs::write(
            &config,
            format!(
                "[storage]\ndata_dir = {:?}\n\n[agent]\nusername = {username:?}\npassword = {password:?}\n",
                data_dir.display().to_string()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    /// Run `travrec` with only the given arguments, feeding `input` on stdin.
    fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_travrec"))
            .env_clear()
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        // The process may exit before reading stdin
        let mut stdin = child.stdin.take().unwrap();
        let _ = stdin.write_all(input.as_bytes());
        drop(stdin);

        child.wait_with_output().unwrap()
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with_input(args, "")
    }

    /// Run a back-office command logged in as the default agent.
    fn run_as_agent(&self, args: &[&str]) -> Output {
        let mut full = vec!["--username", "admin", "--password", "admin"];
        full.extend_from_slice(args);
        self.run(&full)
    }

    fn data_file(&self, name: &str) -> PathBuf {
        self.dir.path().join("data").join(name)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_create_prints_padded_id() {
    let agency = Agency::new();

    let output = agency.run_as_agent(&["create", "airline", "-f", "Company Name=Delta"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Airline created with ID 000000001"));

    let saved = std::fs::read_to_string(agency.data_file("airlines.json")).unwrap();
    assert!(saved.contains("Delta"));
}

#[test]
fn test_missing_record_is_a_warning() {
    let agency = Agency::new();

    for args in [
        &["view", "client", "99"][..],
        &["edit", "client", "5", "-f", "Name=X"][..],
        &["delete", "airline", "3", "--yes"][..],
    ] {
        let output = agency.run_as_agent(args);
        assert!(output.status.success(), "{args:?}: {}", stderr(&output));
        assert!(
            stderr(&output).contains("not found"),
            "{args:?} printed {:?}",
            stderr(&output)
        );
    }
}

#[test]
fn test_quiet_keeps_missing_record_warning() {
    let agency = Agency::new();

    let output = agency.run_as_agent(&["-q", "view", "airline", "7"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Airline not found"));
}

#[test]
fn test_validation_error_names_field() {
    let agency = Agency::new();

    let output = agency.run_as_agent(&["create", "client", "-f", "Name=Jane"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Address Line 1"));

    // Nothing was stored
    let saved = std::fs::read_to_string(agency.data_file("clients.json")).unwrap();
    assert_eq!(saved.trim(), "[]");
}

#[test]
fn test_declining_delete_keeps_record() {
    let agency = Agency::new();
    agency.run_as_agent(&["create", "airline", "-f", "Company Name=KLM"]);

    let output = agency.run_with_input(
        &["--username", "admin", "--password", "admin", "delete", "airline", "1"],
        "n\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Are you sure you want to delete"));
    assert!(stdout(&output).contains("Deletion cancelled"));

    let output = agency.run_as_agent(&["view", "airline", "1", "--format", "json"]);
    assert!(stdout(&output).contains("KLM"));
}

#[test]
fn test_confirming_delete_removes_record() {
    let agency = Agency::new();
    agency.run_as_agent(&["create", "airline", "-f", "Company Name=KLM"]);

    let output = agency.run_with_input(
        &["--username", "admin", "--password", "admin", "delete", "airline", "1"],
        "y\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("been deleted"));

    let saved = std::fs::read_to_string(agency.data_file("airlines.json")).unwrap();
    assert!(!saved.contains("KLM"));
}

#[test]
fn test_wrong_password_is_rejected() {
    let agency = Agency::new();

    let output = agency.run(&[
        "--username",
        "admin",
        "--password",
        "nope",
        "create",
        "airline",
        "-f",
        "Company Name=Delta",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid credentials"));
    assert!(!stdout(&output).contains("created"));
}

#[test]
fn test_password_is_never_prompted_for() {
    let agency = Agency::new();

    let output = agency.run_with_input(&["--username", "admin", "view", "client"], "admin\n");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("TRAVREC_PASSWORD"));
    assert!(!stderr(&output).contains("Password:"));
}

#[test]
fn test_password_from_environment() {
    let agency = Agency::new();

    let output = Command::new(env!("CARGO_BIN_EXE_travrec"))
        .env_clear()
        .env("TRAVREC_USERNAME", "admin")
        .env("TRAVREC_PASSWORD", "admin")
        .arg("--config")
        .arg(&agency.config)
        .args(["view", "client"])
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn test_lookup_needs_no_login() {
    let agency = Agency::new();

    let output = agency.run(&["lookup", "--client", "1", "--airline", "1"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("No matching flights found"));
}

#[test]
fn test_config_show_json_masks_password() {
    let agency = Agency::with_agent("desk", "s3cret");

    let output = agency.run(&["config", "show", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let shown = stdout(&output);
    assert!(shown.contains("desk"));
    assert!(!shown.contains("s3cret"));
}
