//! nut-setup Library
//!
//! Configures a NUT (Network UPS Tools) lab host with an emulated UPS:
//! package installation, configuration files with backups, an idempotent
//! NOTIFYCMD upsert, service restart, status check and outage simulation.

pub mod backup;
pub mod cli;
pub mod command_args;
pub mod command_runner;
pub mod commands;
pub mod config;
pub mod console;
pub mod directive;
pub mod error;
pub mod logging;
pub mod sanity;
pub mod setup;
pub mod templates;

// Re-export main types for convenience
pub use backup::{backup_config_file, replace_config_file, write_config_file};
pub use command_args::CommandArgs;
pub use command_runner::{
    CommandOutput, CommandRunner, CommandSpec, OnFailure, OutputMode, SystemCommandRunner,
};
pub use config::{NutPaths, SetupProfile};
pub use console::{Prompter, StdinPrompter};
pub use directive::{upsert_directive, upsert_directive_with_keyword};
pub use error::{Result, SetupError};
pub use setup::{NotifyChoice, Setup, SetupOptions};
