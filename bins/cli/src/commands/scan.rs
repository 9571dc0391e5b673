//! Scan command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use hdrfence_adapters::{JsonLogger, LocalFileSystem, StderrLogSink};
use hdrfence_app::{ScanDeps, ScanInput, load_rule_set, scan_state_files};
use hdrfence_config::{ScanConfig, ScanEnv, resolve_config};
use hdrfence_domain::{Finding, compare_findings};
use hdrfence_ports::LogLevel;
use std::fmt::Write as _;
use std::sync::Arc;

/// Raw scan command arguments.
#[derive(Debug, Clone)]
pub struct ScanCommandInput {
    /// Workspace root from `-w`, if given.
    pub workspace: Option<String>,
    /// Exception-list path from `-e`.
    pub exceptions: String,
    /// Sysroot from `-s`, if given.
    pub sysroot: Option<String>,
    /// Positional build-state file paths.
    pub state_files: Vec<String>,
}

/// Run the scan command.
pub fn run_scan(mode: OutputMode, input: ScanCommandInput) -> Result<CliOutput, CliError> {
    let env = ScanEnv::from_std_env();
    let config = resolve_config(
        ScanConfig {
            workspace: input.workspace,
            exception_file: input.exceptions,
            sysroot: input.sysroot,
            state_files: input.state_files,
        },
        &env,
    )?;

    let mut deps = ScanDeps::new(Arc::new(LocalFileSystem::new()));
    if mode.verbose {
        let logger = JsonLogger::new(Arc::new(StderrLogSink)).with_min_level(LogLevel::Debug);
        deps = deps.with_logger(Arc::new(logger));
    }

    let rules = load_rule_set(&deps, &config.exception_file, config.sysroot.as_deref())?;
    let scan_input = ScanInput {
        workspace: config.workspace,
        state_files: config.state_files,
    };
    let mut findings = scan_state_files(&deps, &rules, &scan_input)?;
    findings.sort_by(compare_findings);

    let stdout = if mode.is_ndjson() {
        format_findings_ndjson(&findings)?
    } else if mode.is_json() {
        format_findings_json(&findings)?
    } else {
        format_findings_text(&findings)
    };

    // Findings never change the exit code; only failures do.
    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_findings_text(findings: &[Finding]) -> String {
    let mut output = String::new();
    for finding in findings {
        let _ = writeln!(output, "{finding}");
    }
    output
}

fn format_findings_json(findings: &[Finding]) -> Result<String, CliError> {
    let payload = serde_json::json!({
        "status": "ok",
        "findings": findings,
    });
    let mut output = serde_json::to_string_pretty(&payload)?;
    output.push('\n');
    Ok(output)
}

fn format_findings_ndjson(findings: &[Finding]) -> Result<String, CliError> {
    let mut output = String::new();
    for finding in findings {
        let record = serde_json::json!({
            "type": "finding",
            "directory": finding.directory,
            "target": finding.target,
            "headerPath": finding.header_path,
        });
        output.push_str(&serde_json::to_string(&record)?);
        output.push('\n');
    }
    let summary = serde_json::json!({
        "type": "summary",
        "status": "ok",
        "findings": findings.len(),
    });
    output.push_str(&serde_json::to_string(&summary)?);
    output.push('\n');
    Ok(output)
}
