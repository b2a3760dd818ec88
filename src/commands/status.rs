//! Type-safe arguments for `upsc`, the NUT status client.

use crate::command_args::CommandArgs;
use crate::command_runner::OnFailure;

/// `upsc <ups>@<host>`; verification only, so failures are not fatal.
#[derive(Debug, Clone)]
pub struct UpscArgs {
    /// Device identifier such as `emulated_ups@localhost`.
    pub target: String,
}

impl CommandArgs for UpscArgs {
    fn program(&self) -> &'static str {
        "upsc"
    }

    fn to_args(&self) -> Vec<String> {
        vec![self.target.clone()]
    }

    fn on_failure(&self) -> OnFailure {
        OnFailure::Continue
    }
}
