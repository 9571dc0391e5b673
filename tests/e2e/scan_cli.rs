//! End-to-end CLI tests driving the compiled binary.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Output};

fn run_hdrfence(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_hdrfence"))
        .args(args)
        .env_remove("HDRFENCE_WORKSPACE")
        .env_remove("CODEMGR_WS")
        .output()
}

fn write_fixture(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)
}

#[test]
fn reports_out_of_workspace_headers() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/other/inc/foo.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "# empty\n")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = format!(
        "{}: lib.o: /opt/other/inc/foo.h\n",
        dir.path().to_string_lossy()
    );
    assert_eq!(stdout, expected);
    Ok(())
}

#[test]
fn header_ignore_glob_suppresses_the_finding() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/other/inc/foo.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "IGNORE_HEADER /opt/other/inc/*.h\n")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn sysroot_reinterprets_header_patterns() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /proto/usr/include/x.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "IGNORE_HEADER /usr/include/x.h\n")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-s",
        "/proto",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn findings_do_not_change_the_exit_code() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(
        &statefile,
        "a.o: /opt/a.h\nb.o: /opt/b.h /opt/c.h\n\tcc -o ignored /opt/d.h\n",
    )?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);
    Ok(())
}

#[test]
fn json_output_reports_findings_structurally() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/other/inc/foo.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "--output",
        "json",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(
        value.get("status").and_then(serde_json::Value::as_str),
        Some("ok")
    );
    assert_eq!(
        value
            .pointer("/findings/0/headerPath")
            .and_then(serde_json::Value::as_str),
        Some("/opt/other/inc/foo.h")
    );
    Ok(())
}

#[test]
fn missing_workspace_is_a_usage_error() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/x.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "")?;

    let output = run_hdrfence(&[
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-w not specified"));
    Ok(())
}

#[test]
fn workspace_falls_back_to_the_environment() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/other/inc/foo.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "")?;

    let output = Command::new(env!("CARGO_BIN_EXE_hdrfence"))
        .args([
            "-e",
            &exceptions.to_string_lossy(),
            &statefile.to_string_lossy(),
        ])
        .env_remove("HDRFENCE_WORKSPACE")
        .env("CODEMGR_WS", "/workspace")
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lib.o: /opt/other/inc/foo.h"));
    Ok(())
}

#[test]
fn missing_exception_list_fails_the_run() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/x.h\n")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-e",
        &dir.path().join("absent").to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn malformed_exception_line_fails_with_its_line_number() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/x.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "# fine\nIGNORE_HEADER too many tokens\n")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(": 2: malformed line"));
    Ok(())
}

#[test]
fn missing_state_file_fails_the_whole_batch() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "lib.o: /opt/x.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "")?;

    let output = run_hdrfence(&[
        "-w",
        "/workspace",
        "-e",
        &exceptions.to_string_lossy(),
        &statefile.to_string_lossy(),
        &dir.path().join("absent.state").to_string_lossy(),
    ])?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn missing_arguments_are_usage_errors() -> io::Result<()> {
    // No positional state files.
    let output = run_hdrfence(&["-w", "/workspace", "-e", "/tmp/exceptions"])?;
    assert_eq!(output.status.code(), Some(2));

    // No exception list at all.
    let output = run_hdrfence(&["-w", "/workspace", "/tmp/Make.state"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn two_runs_report_the_same_findings() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let statefile = dir.path().join("Make.state");
    write_fixture(&statefile, "a.o: /opt/x.h /opt/y.h\nb.o: /opt/x.h\n")?;
    let exceptions = dir.path().join("exceptions");
    write_fixture(&exceptions, "")?;

    let exceptions_arg = exceptions.to_string_lossy().into_owned();
    let statefile_arg = statefile.to_string_lossy().into_owned();
    let args = [
        "-w",
        "/workspace",
        "-e",
        exceptions_arg.as_str(),
        statefile_arg.as_str(),
    ];

    let first = run_hdrfence(&args)?;
    let second = run_hdrfence(&args)?;

    let mut first_lines: Vec<String> = String::from_utf8_lossy(&first.stdout)
        .lines()
        .map(str::to_owned)
        .collect();
    let mut second_lines: Vec<String> = String::from_utf8_lossy(&second.stdout)
        .lines()
        .map(str::to_owned)
        .collect();
    first_lines.sort();
    second_lines.sort();
    assert_eq!(first_lines, second_lines);
    assert_eq!(first_lines.len(), 3);
    Ok(())
}
