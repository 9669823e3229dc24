//! Shared testing utilities for glee-config CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Directory used as the working directory of CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `glee-config` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("glee-config").expect("Failed to locate glee-config binary");
        cmd.current_dir(self.work_dir()).env_remove("GLEE_CONFIG_LOG");
        cmd
    }

    /// Write a file relative to the work directory.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Read a file relative to the work directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read test file")
    }

    /// Write a starter model into the work directory via `init`.
    pub fn init_template(&self, template: &str, output: &str) {
        self.cli().args(["init", "-t", template, "-o", output]).assert().success();
    }
}
