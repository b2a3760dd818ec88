//! Type-safe command argument contracts.
//!
//! External programs (apt-get, systemctl, upsc) are never invoked from raw
//! string vectors scattered through the setup code. Instead a struct
//! implements `CommandArgs` and the execution layer turns it into an argv.
//!
//! # Design Goals
//!
//! 1. **Single Source of Truth**: The struct definition IS the contract.
//! 2. **Failure Policy Travels With The Command**: each command declares
//!    whether its output is streamed and whether a failure is fatal.

use crate::command_runner::{CommandSpec, OnFailure, OutputMode};

/// Trait for typed command arguments.
///
/// # Contract
///
/// - `program()`: the executable name, resolved through `PATH`.
/// - `to_args()`: arguments exactly as the program expects them.
/// - `output_mode()` / `on_failure()`: how the runner treats the command.
///
/// # Example
///
/// ```
/// use nut_setup::command_args::CommandArgs;
/// use nut_setup::commands::service::{ServiceAction, SystemctlArgs};
///
/// let args = SystemctlArgs::new(ServiceAction::Restart, "nut-server");
/// assert_eq!(args.argv(), vec!["systemctl", "restart", "nut-server"]);
/// ```
pub trait CommandArgs {
    /// Executable name (e.g. "apt-get").
    fn program(&self) -> &'static str;

    /// Arguments following the program name.
    fn to_args(&self) -> Vec<String>;

    /// Whether output is streamed to the console or captured.
    fn output_mode(&self) -> OutputMode {
        OutputMode::Stream
    }

    /// Whether a non-zero exit aborts the run.
    fn on_failure(&self) -> OnFailure {
        OnFailure::Abort
    }

    /// Full argument vector, program first.
    fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.program().to_string()];
        argv.extend(self.to_args());
        argv
    }

    /// Build the spec handed to a `CommandRunner`.
    fn to_spec(&self) -> CommandSpec {
        CommandSpec {
            argv: self.argv(),
            output: self.output_mode(),
            on_failure: self.on_failure(),
        }
    }
}
