//! Type-safe arguments for `systemctl`.

use strum::{Display, EnumString};

use crate::command_args::CommandArgs;
use crate::command_runner::{OnFailure, OutputMode};

/// Service lifecycle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

/// `systemctl <action> <unit>`
///
/// | Action    | Output  | Failure |
/// |-----------|---------|---------|
/// | `restart` | capture | reported to the caller, which decides |
/// | `start`   | stream  | best-effort |
/// | `stop`    | stream  | best-effort |
#[derive(Debug, Clone)]
pub struct SystemctlArgs {
    pub action: ServiceAction,
    pub unit: String,
}

impl SystemctlArgs {
    pub fn new(action: ServiceAction, unit: impl Into<String>) -> Self {
        Self {
            action,
            unit: unit.into(),
        }
    }
}

impl CommandArgs for SystemctlArgs {
    fn program(&self) -> &'static str {
        "systemctl"
    }

    fn to_args(&self) -> Vec<String> {
        vec![self.action.to_string(), self.unit.clone()]
    }

    fn output_mode(&self) -> OutputMode {
        match self.action {
            ServiceAction::Restart => OutputMode::Capture,
            ServiceAction::Start | ServiceAction::Stop => OutputMode::Stream,
        }
    }

    fn on_failure(&self) -> OnFailure {
        OnFailure::Continue
    }
}
