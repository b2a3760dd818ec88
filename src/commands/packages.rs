//! Type-safe arguments for `apt-get`.
//!
//! Package installation is fatal on failure: a half-installed NUT suite
//! leaves nothing worth configuring.

use crate::command_args::CommandArgs;

/// `apt-get update`
#[derive(Debug, Clone, Default)]
pub struct AptUpdateArgs;

impl CommandArgs for AptUpdateArgs {
    fn program(&self) -> &'static str {
        "apt-get"
    }

    fn to_args(&self) -> Vec<String> {
        vec!["update".to_string()]
    }
}

/// `apt-get install -y <packages...>`
#[derive(Debug, Clone)]
pub struct AptInstallArgs {
    /// Package names, installed in one transaction.
    pub packages: Vec<String>,
}

impl CommandArgs for AptInstallArgs {
    fn program(&self) -> &'static str {
        "apt-get"
    }

    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(self.packages.iter().cloned());
        args
    }
}
