//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::Parser;
use commands::{ScanCommandInput, run_scan};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(
    name = "hdrfence",
    version,
    about = "Audit build-state files for out-of-workspace header dependencies",
    long_about = None
)]
struct Cli {
    /// Workspace root; defaults to HDRFENCE_WORKSPACE, then CODEMGR_WS.
    #[arg(short = 'w', long = "workspace", value_name = "DIR")]
    workspace: Option<String>,

    /// Exception list suppressing accepted cross-boundary references.
    #[arg(short = 'e', long = "exceptions", value_name = "FILE")]
    exceptions: String,

    /// Sysroot that header-ignore patterns are reinterpreted against.
    #[arg(short = 's', long = "sysroot", value_name = "DIR")]
    sysroot: Option<String>,

    #[command(flatten)]
    output: OutputArgs,

    /// Build-state files to scan.
    #[arg(required = true, value_name = "STATEFILE")]
    state_files: Vec<String>,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    let input = ScanCommandInput {
        workspace: cli.workspace,
        exceptions: cli.exceptions,
        sysroot: cli.sysroot,
        state_files: cli.state_files,
    };

    match run_scan(mode, input) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    if !output.stdout.is_empty() {
        let mut stdout = io::stdout();
        stdout
            .write_all(output.stdout.as_bytes())
            .map_err(|error| CliError::Tool(error.into()))?;
    }
    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr
            .write_all(output.stderr.as_bytes())
            .map_err(|error| CliError::Tool(error.into()))?;
    }
    Ok(())
}
