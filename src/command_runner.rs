//! Command execution facility.
//!
//! Every external program goes through a `CommandRunner`. The runner prints
//! the command line, runs it to completion, and either returns its output or,
//! for commands marked `OnFailure::Abort`, turns a non-zero exit into
//! `SetupError::CommandFailed`. It never exits the process itself; the entry
//! point decides what a failure means.
//!
//! `SystemCommandRunner` spawns real processes. `RecordingRunner` records
//! specs and replays canned exit codes so the setup sequence can be tested
//! without touching the host.

use std::collections::HashMap;
use std::process::{Command, Stdio};

use crate::console;
use crate::error::{Result, SetupError};

/// How a command's output reaches the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Inherit stdout/stderr so output appears live
    Stream,
    /// Capture stdout/stderr; stdout is echoed once the command finishes
    Capture,
}

/// What a non-zero exit means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Return `SetupError::CommandFailed`
    Abort,
    /// Report the failure and hand back the output
    Continue,
}

/// A fully described command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub argv: Vec<String>,
    pub output: OutputMode,
    pub on_failure: OnFailure,
}

impl CommandSpec {
    /// Command line as shown to the operator
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output (empty when streamed).
    pub stdout: String,
    /// Standard error (empty when streamed).
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Output of a successful command with no captured text
    pub fn succeeded() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            ..Self::default()
        }
    }

    /// Output of a command that exited with `code`
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            success: code == 0,
            ..Self::default()
        }
    }
}

/// Executes external commands on behalf of the setup sequence
pub trait CommandRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Apply the failure policy shared by every runner.
///
/// Prints captured stdout, reports failures and converts them to errors for
/// `OnFailure::Abort` commands.
fn finish(spec: &CommandSpec, output: CommandOutput) -> Result<CommandOutput> {
    if spec.output == OutputMode::Capture && !output.stdout.is_empty() {
        print!("{}", output.stdout);
    }

    if output.success {
        return Ok(output);
    }

    let code = output
        .exit_code
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    console::error(format!("Command failed with exit code {}: {}", code, spec.display()));
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }
    tracing::warn!(command = %spec.display(), exit_code = ?output.exit_code, "command failed");

    match spec.on_failure {
        OnFailure::Abort => Err(SetupError::command_failed(spec.display(), output.exit_code)),
        OnFailure::Continue => Ok(output),
    }
}

/// Runner that spawns real processes.
///
/// In dry-run mode commands are only announced and reported as successful.
#[derive(Debug, Default)]
pub struct SystemCommandRunner {
    dry_run: bool,
}

impl SystemCommandRunner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    fn execute(spec: &CommandSpec) -> Result<CommandOutput> {
        let (program, args) = spec
            .argv
            .split_first()
            .ok_or_else(|| SetupError::config("empty command line"))?;

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::inherit());

        let output = match spec.output {
            OutputMode::Stream => {
                let status = cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()?;
                CommandOutput {
                    exit_code: status.code(),
                    success: status.success(),
                    ..CommandOutput::default()
                }
            }
            OutputMode::Capture => {
                let output = cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).output()?;
                CommandOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                    exit_code: output.status.code(),
                    success: output.status.success(),
                }
            }
        };
        Ok(output)
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandOutput> {
        console::info(format!("Running: {}", spec.display()));
        tracing::debug!(argv = ?spec.argv, output = ?spec.output, on_failure = ?spec.on_failure, "spawning command");

        if self.dry_run {
            console::info("[dry-run] Command not executed");
            return Ok(CommandOutput::succeeded());
        }

        let output = match Self::execute(spec) {
            Ok(output) => output,
            Err(SetupError::Io(e)) => {
                // A missing binary behaves like a failed command
                console::error(format!("Could not start {}: {}", spec.display(), e));
                tracing::error!("Failed to spawn {}: {}", spec.display(), e);
                let output = CommandOutput {
                    stderr: format!("{}\n", e),
                    exit_code: None,
                    success: false,
                    ..CommandOutput::default()
                };
                return match spec.on_failure {
                    OnFailure::Abort => Err(SetupError::Io(e)),
                    OnFailure::Continue => Ok(output),
                };
            }
            Err(e) => return Err(e),
        };

        finish(spec, output)
    }
}

/// Runner that records every spec and answers with canned exit codes.
///
/// Commands without a canned code succeed. Codes are keyed by the full
/// command line (`"systemctl restart nut-server"`).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    exit_codes: HashMap<String, i32>,
    stdout: HashMap<String, String>,
    calls: Vec<CommandSpec>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command_line` exit with `code`
    pub fn fail_with(mut self, command_line: &str, code: i32) -> Self {
        self.exit_codes.insert(command_line.to_string(), code);
        self
    }

    /// Make `command_line` print `stdout` when captured
    pub fn with_stdout(mut self, command_line: &str, stdout: &str) -> Self {
        self.stdout.insert(command_line.to_string(), stdout.to_string());
        self
    }

    /// Specs received so far, in order
    pub fn calls(&self) -> &[CommandSpec] {
        &self.calls
    }

    /// Command lines received so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.iter().map(CommandSpec::display).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.push(spec.clone());
        let line = spec.display();
        let mut output = CommandOutput::exited(self.exit_codes.get(&line).copied().unwrap_or(0));
        if spec.output == OutputMode::Capture {
            output.stdout = self.stdout.get(&line).cloned().unwrap_or_default();
        }
        finish(spec, output)
    }
}
