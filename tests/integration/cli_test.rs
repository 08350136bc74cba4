//! Integration tests for the `convertify` binary.
//!
//! These run without ImageMagick; the converter is pointed at a binary that
//! does not exist.

mod helpers;

use helpers::{MISSING_TOOL, TestCli, stderr, stdout};

#[test]
fn test_encode_prints_data_uri() {
    let cli = TestCli::new(MISSING_TOOL);
    let path = cli.write("pixel.png", b"\x89PNG\r\n\x1a\n");

    let output = cli.run_with_path(&["encode"], &path);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "data:image/png;base64,iVBORw0KGgo=");
}

#[test]
fn test_encode_json_output() {
    let cli = TestCli::new(MISSING_TOOL);
    let path = cli.write("logo.gif", b"GIF89a");

    let output = cli.run_with_path(&["--format", "json", "encode"], &path);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(body["data_uri"], "data:image/gif;base64,R0lGODlh");
}

#[test]
fn test_encode_unsupported_extension_fails() {
    let cli = TestCli::new(MISSING_TOOL);
    let path = cli.write("notes.txt", b"hello");

    let output = cli.run_with_path(&["encode"], &path);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("UNSUPPORTED_FORMAT"));
}

#[test]
fn test_check_exits_non_zero_when_missing() {
    let cli = TestCli::new(MISSING_TOOL);

    let output = cli.run(&["check"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("NOT_INSTALLED"));
}

#[test]
fn test_check_json_reports_absence() {
    let cli = TestCli::new(MISSING_TOOL);

    let output = cli.run(&["--format", "json", "check"]);

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(body["installed"], false);
    assert_eq!(body["tool"], MISSING_TOOL);
}

#[test]
fn test_convert_base64_without_tool_fails_before_staging() {
    let cli = TestCli::new(MISSING_TOOL);
    let input = cli.write("in.txt", b"data:image/png;base64,iVBORw0KGgo=\n");
    let out = cli.path("out.txt");

    let output = cli.run(&[
        "convert-base64",
        "--to",
        "jpg",
        "--input",
        &input.to_string_lossy(),
        "--output",
        &out.to_string_lossy(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("NOT_INSTALLED"));
    assert!(!out.exists());
    assert!(!cli.staging_exists());
}

#[test]
fn test_convert_file_without_tool_fails() {
    let cli = TestCli::new(MISSING_TOOL);
    let input = cli.write("in.png", b"\x89PNG\r\n\x1a\n");
    let out = cli.path("out.jpg");

    let output = cli.run(&[
        "convert",
        &input.to_string_lossy(),
        &out.to_string_lossy(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn test_debug_logging_reports_command_on_stderr() {
    let cli = TestCli::new(MISSING_TOOL);
    let path = cli.write("pixel.png", b"\x89PNG\r\n\x1a\n");

    let output = cli.run_with_log(&["encode", &path.to_string_lossy()], "debug");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Executing command"));
    assert_eq!(stdout(&output), "data:image/png;base64,iVBORw0KGgo=");
}

#[test]
fn test_invalid_config_is_reported() {
    let cli = TestCli::new("");

    let output = cli.run(&["check"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("tool_path"));
}

#[cfg(unix)]
#[test]
fn test_convert_base64_with_stand_in_tool() {
    use std::os::unix::fs::PermissionsExt;

    // A shell script standing in for `convert`: answers the version probe
    // and copies input to output.
    let scratch = tempfile::tempdir().expect("tempdir");
    let tool = scratch.path().join("fake-convert");
    std::fs::write(
        &tool,
        "#!/bin/sh\nif [ \"$1\" = \"-version\" ]; then echo 'Version: ImageMagick 7.1.1'; exit 0; fi\ncp \"$1\" \"$2\"\n",
    )
    .expect("write tool");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).expect("chmod");

    let cli = TestCli::new(&tool.to_string_lossy());
    let input = cli.write("in.txt", b"data:image/png;base64,iVBORw0KGgo=");

    let output = cli.run(&[
        "convert-base64",
        "--to",
        "webp",
        "--input",
        &input.to_string_lossy(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "data:image/webp;base64,iVBORw0KGgo=");
    assert_eq!(
        std::fs::read_dir(cli.path("staging")).expect("staging").count(),
        0
    );
}
