// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn genflow(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("genflow").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

fn tooling_dir(root: &Path) -> std::path::PathBuf {
    let tools = root.join("toolkit");
    std::fs::create_dir_all(&tools).unwrap();
    std::fs::write(tools.join("gradlew"), "").unwrap();
    std::fs::write(tools.join("build.gradle"), "").unwrap();
    tools
}

#[test]
fn list_shows_catalog() {
    let dir = tempfile::tempdir().unwrap();
    genflow(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("java-vkit-client"))
        .stdout(predicate::str::contains("go-core-proto"))
        .stdout(predicate::str::contains("sample"));
}

#[test]
fn list_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let output = genflow(dir.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 13);
}

#[test]
fn validate_reports_every_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    genflow(dir.path())
        .args(["validate", "java-core", "--set", "src_proto_path=protos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_name"))
        .stderr(predicate::str::contains("gapi_tools_path"))
        .stderr(predicate::str::contains("import_proto_path"))
        .stderr(predicate::str::contains("output_dir"));
}

#[test]
fn validate_accepts_complete_config() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tooling_dir(dir.path());
    std::fs::write(
        dir.path().join("genflow.yaml"),
        format!(
            "src_proto_path: protos\n\
             import_proto_path: imports\n\
             gapi_tools_path: {}\n\
             output_dir: out\n\
             api_name: library\n",
            tools.display()
        ),
    )
    .unwrap();

    genflow(dir.path())
        .args(["validate", "java-core"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn unknown_pipeline_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    genflow(dir.path())
        .args(["plan", "rust-core"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rust-core"));
}

#[test]
fn plan_sample_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("sample.yaml");
    std::fs::write(&config, "sleep_secs: 0\n").unwrap();

    genflow(dir.path())
        .args(["plan", "sample", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("sample-flow"))
        .stdout(predicate::str::contains("1. SampleTask (sample)"));
}

#[test]
fn plan_json_lists_steps() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tooling_dir(dir.path());

    let output = genflow(dir.path())
        .args(["plan", "go-core-proto", "--format", "json"])
        .args(["--set", "src_proto_path=protos"])
        .args(["--set", "import_proto_path=imports"])
        .arg("--set")
        .arg(format!("gapi_tools_path={}", tools.display()))
        .args(["--set", "output_dir=out"])
        .args(["--set", "api_name=library"])
        .args(["--set", "veneer_api_yaml=library_veneer.yaml"])
        .args(["--set", "final_repo_dir=final"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let flow: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = flow["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2]["name"], "UpdateImports");
    for step in steps {
        assert_eq!(step["injection"]["language"], "go");
    }
}

#[test]
fn run_sample_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    genflow(dir.path())
        .args(["run", "sample", "--set", "sleep_secs=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SampleTask"));
}

#[test]
fn run_codegen_without_executor_fails() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tooling_dir(dir.path());

    genflow(dir.path())
        .args(["run", "java-core", "--skip-requirements"])
        .args(["--set", "src_proto_path=protos"])
        .args(["--set", "import_proto_path=imports"])
        .arg("--set")
        .arg(format!("gapi_tools_path={}", tools.display()))
        .args(["--set", "output_dir=out"])
        .args(["--set", "api_name=library"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("proto-code-gen"));
}

#[test]
fn requirements_graph_mermaid() {
    let dir = tempfile::tempdir().unwrap();
    genflow(dir.path())
        .args(["requirements", "graph", "--format", "mermaid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pip --> yapf"));
}

#[test]
fn requirements_install_unknown() {
    let dir = tempfile::tempdir().unwrap();
    genflow(dir.path())
        .args(["requirements", "install", "clang-format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("clang-format"));
}
