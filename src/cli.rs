use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::SetupProfile;
use crate::error::Result;
use crate::setup::{NotifyChoice, SetupOptions};

/// nut-setup - NUT virtual UPS lab configurator
#[derive(Parser, Debug)]
#[command(name = "nut-setup")]
#[command(about = "Installs NUT and configures an emulated UPS with optional mail notifications")]
#[command(version)]
pub struct Cli {
    /// NUT configuration directory (overrides the profile's config_root)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// JSON setup profile (packages, service, credentials, mailer...)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show what would be executed and written without making changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configure NOTIFYCMD for this address without prompting
    #[arg(long, global = true, conflicts_with = "no_notify")]
    pub notify_email: Option<String>,

    /// Skip the NOTIFYCMD step without prompting
    #[arg(long, global = true)]
    pub no_notify: bool,

    /// Run the outage simulation without asking first
    #[arg(long, global = true, conflicts_with = "no_simulate")]
    pub simulate_outage: bool,

    /// Skip the outage simulation without prompting
    #[arg(long, global = true)]
    pub no_simulate: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the full setup sequence (default)
    Setup,
    /// Only configure NOTIFYCMD in upsmon.conf
    Notify,
    /// Only query the emulated UPS with upsc
    Status,
    /// Only run the outage simulation
    Simulate,
    /// Validate a setup profile file
    Validate {
        /// Path to the profile to validate
        profile: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command to run; no subcommand means the full setup.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Setup)
    }

    /// Load the profile (or defaults) and apply command-line overrides.
    pub fn profile(&self) -> Result<SetupProfile> {
        let mut profile = match &self.config {
            Some(path) => SetupProfile::load_from_file(path)?,
            None => SetupProfile::default(),
        };
        if let Some(root) = &self.root {
            profile.config_root = root.clone();
        }
        profile.validate()?;
        Ok(profile)
    }

    /// Prompt answers and switches given on the command line
    pub fn options(&self) -> SetupOptions {
        let notify = if self.no_notify {
            NotifyChoice::Decline
        } else if let Some(email) = &self.notify_email {
            NotifyChoice::Email(email.clone())
        } else {
            NotifyChoice::Ask
        };

        let simulate_outage = if self.no_simulate {
            Some(false)
        } else if self.simulate_outage {
            Some(true)
        } else {
            None
        };

        SetupOptions {
            notify,
            simulate_outage,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["nut-setup"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.command(), Commands::Setup);

        let options = cli.options();
        assert_eq!(options.notify, NotifyChoice::Ask);
        assert_eq!(options.simulate_outage, None);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_cli_validate() {
        let cli = Cli::try_parse_from(["nut-setup", "validate", "/path/to/profile.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate { profile }) => {
                assert_eq!(profile, PathBuf::from("/path/to/profile.json"));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_preset_answers() {
        let cli = Cli::try_parse_from([
            "nut-setup",
            "--notify-email",
            "ops@example.com",
            "--no-simulate",
            "--dry-run",
        ])
        .unwrap();
        let options = cli.options();
        assert_eq!(options.notify, NotifyChoice::Email("ops@example.com".to_string()));
        assert_eq!(options.simulate_outage, Some(false));
        assert!(options.dry_run);
    }

    #[test]
    fn test_cli_conflicting_answers() {
        assert!(Cli::try_parse_from(["nut-setup", "--notify-email", "a@b.c", "--no-notify"]).is_err());
        assert!(Cli::try_parse_from(["nut-setup", "--simulate-outage", "--no-simulate"]).is_err());
    }

    #[test]
    fn test_cli_root_override() {
        let cli = Cli::try_parse_from(["nut-setup", "notify", "--root", "/srv/nut"]).unwrap();
        assert_eq!(cli.command(), Commands::Notify);
        let profile = cli.profile().unwrap();
        assert_eq!(profile.config_root, PathBuf::from("/srv/nut"));
    }

    #[test]
    fn test_cli_relative_root_rejected() {
        let cli = Cli::try_parse_from(["nut-setup", "--root", "relative/nut"]).unwrap();
        assert!(cli.profile().is_err());
    }
}
