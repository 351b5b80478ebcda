//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// The demo CLI used across the integration tests
pub const DEMO: &str = r#"
name: demo
help: Demo tool
options:
  - flags: --verbose
    help: Print more
  - flags: --help
commands:
  build:
    help: Build the project
    options:
      - flags: --output
        takes-value: true
      - flags: --jobs
        takes-value: true
      - flags: --format
        choices: [json, yaml]
"#;

/// Create a temporary directory with a definition file
pub fn create_definition(content: &str) -> (TempDir, PathBuf) {
    create_named_definition("demo.yml", content)
}

/// Create a definition file with a given file name
pub fn create_named_definition(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let definition_path = temp_dir.path().join(file_name);
    fs::write(&definition_path, content).unwrap();
    (temp_dir, definition_path)
}

/// Whether a shell can be started, used to skip syntax checks
pub fn has_program(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}
