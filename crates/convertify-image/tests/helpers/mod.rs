//! Shared test helpers for converter integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use convertify_core::config::ConverterConfig;
use convertify_image::executor::ExecutorError;
use convertify_image::{ImageConverter, ToolInvocation, ToolOutput, ToolRunner};

/// Prefix the fake tool writes in front of the input bytes.
pub const CONVERTED_MARKER: &[u8] = b"converted:";

/// How the fake tool behaves when asked to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeMode {
    /// Version check succeeds; conversion writes `marker + input` to the output.
    Working,
    /// Version check fails with a spawn error.
    Missing,
    /// Version check succeeds; conversion exits 1 with a stderr message.
    FailsConversion,
    /// Version check succeeds; conversion exits 0 without writing output.
    NoOutput,
    /// Every invocation (including install steps) exits 1.
    FailsEverything,
}

/// In-process stand-in for the ImageMagick binary.
#[derive(Debug)]
pub struct FakeTool {
    mode: FakeMode,
    calls: Mutex<Vec<ToolInvocation>>,
}

impl FakeTool {
    pub fn new(mode: FakeMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Every invocation seen so far.
    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Invocations other than the version check.
    pub fn non_version_calls(&self) -> Vec<ToolInvocation> {
        self.calls()
            .into_iter()
            .filter(|c| !(c.args.len() == 1 && c.args[0] == "-version"))
            .collect()
    }

    fn ok(stdout: &str) -> ToolOutput {
        ToolOutput {
            success: true,
            exit_code: Some(0),
            stdout: stdout.to_string(),
            ..Default::default()
        }
    }

    fn failed(stderr: &str) -> ToolOutput {
        ToolOutput {
            success: false,
            exit_code: Some(1),
            stderr: stderr.to_string(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ToolRunner for FakeTool {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ExecutorError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(invocation.clone());

        if self.mode == FakeMode::FailsEverything {
            return Ok(Self::failed("E: Unable to locate package imagemagick"));
        }

        let is_version = invocation.args.len() == 1 && invocation.args[0] == "-version";
        if is_version {
            return match self.mode {
                FakeMode::Missing => Err(ExecutorError::Spawn {
                    program: invocation.program.to_string_lossy().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                }),
                _ => Ok(Self::ok(
                    "Version: ImageMagick 6.9.11-60 Q16 x86_64 2021-01-25\nCopyright: (C) 1999-2021",
                )),
            };
        }

        if invocation.program != "convert" {
            // Package-manager steps.
            return Ok(Self::ok("done"));
        }

        match self.mode {
            FakeMode::Working => {
                let input = PathBuf::from(&invocation.args[0]);
                let output = PathBuf::from(&invocation.args[1]);
                let mut bytes = CONVERTED_MARKER.to_vec();
                bytes.extend(tokio::fs::read(&input).await.expect("fake tool reads input"));
                tokio::fs::write(&output, bytes)
                    .await
                    .expect("fake tool writes output");
                Ok(Self::ok(""))
            }
            FakeMode::FailsConversion => Ok(Self::failed(
                "convert: no decode delegate for this image format `PNG'",
            )),
            FakeMode::NoOutput => Ok(Self::ok("")),
            FakeMode::Missing | FakeMode::FailsEverything => unreachable!(),
        }
    }
}

/// A converter wired to a fake tool and a private temp directory.
pub struct TestConverter {
    pub converter: ImageConverter,
    pub tool: Arc<FakeTool>,
    pub staging: PathBuf,
    _temp: TempDir,
}

impl TestConverter {
    pub fn new(mode: FakeMode) -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let staging = temp.path().join("staging");
        let config = ConverterConfig {
            temp_root: Some(staging.clone()),
            ..Default::default()
        };
        let tool = FakeTool::new(mode);
        let converter =
            ImageConverter::with_runner(config, tool.clone()).expect("valid test config");

        Self {
            converter,
            tool,
            staging,
            _temp: temp,
        }
    }

    /// Number of entries left in the staging directory (0 if it was never created).
    pub fn staged_files(&self) -> usize {
        match std::fs::read_dir(&self.staging) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }

    /// A scratch directory next to the staging area for caller-owned files.
    pub fn scratch(&self) -> PathBuf {
        let dir = self._temp.path().join("scratch");
        std::fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }
}
