//! Shared test helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A binary name that will not resolve on any test host.
pub const MISSING_TOOL: &str = "convertify-missing-binary-3f7a";

/// Runs the `convertify` binary against a private config and temp dir.
pub struct TestCli {
    /// Scratch directory owned by the test
    pub dir: TempDir,
    /// Generated configuration file
    pub config_path: PathBuf,
}

impl TestCli {
    /// Create a CLI harness whose converter points at `tool_path`.
    pub fn new(tool_path: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("convertify.toml");
        let staging = dir.path().join("staging");

        std::fs::write(
            &config_path,
            format!(
                "[converter]\ntool_path = \"{}\"\ntemp_root = \"{}\"\n\n[logging]\nlevel = \"warn\"\n",
                tool_path,
                staging.display()
            ),
        )
        .expect("write config");

        Self { dir, config_path }
    }

    /// Path inside the scratch directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the scratch directory.
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }

    /// Whether the staging directory was ever created.
    pub fn staging_exists(&self) -> bool {
        self.path("staging").exists()
    }

    /// Run the binary with `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_convertify"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path())
            .output()
            .expect("run convertify")
    }

    /// Run the binary with `RUST_LOG` set to `filter`.
    pub fn run_with_log(&self, args: &[&str], filter: &str) -> Output {
        Command::new(env!("CARGO_BIN_EXE_convertify"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("RUST_LOG", filter)
            .current_dir(self.dir.path())
            .output()
            .expect("run convertify")
    }

    /// Run the binary with a path argument appended.
    pub fn run_with_path(&self, args: &[&str], path: &Path) -> Output {
        let mut all: Vec<&str> = args.to_vec();
        let path = path.to_string_lossy().to_string();
        all.push(&path);
        self.run(&all)
    }
}

/// Stdout as a trimmed string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
