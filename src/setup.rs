//! Setup sequence
//!
//! Runs the lab setup from start to finish:
//!
//! 1. install packages
//! 2. write `ups.conf` and the scenario script
//! 3. write `upsd.conf`
//! 4. write `upsd.users`
//! 5. optionally upsert NOTIFYCMD into `upsmon.conf`
//! 6. restart the NUT server
//! 7. query the emulated UPS (best-effort)
//! 8. optionally simulate an outage by stopping and starting the server
//!
//! Each step either succeeds or returns an error that ends the run; files
//! already written stay written. Every overwrite is preceded by a backup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backup;
use crate::command_args::CommandArgs;
use crate::command_runner::{CommandOutput, CommandRunner};
use crate::commands::packages::{AptInstallArgs, AptUpdateArgs};
use crate::commands::service::{ServiceAction, SystemctlArgs};
use crate::commands::status::UpscArgs;
use crate::config::{NutPaths, SetupProfile};
use crate::console::{self, Prompter};
use crate::directive::upsert_directive;
use crate::error::{Result, SetupError};
use crate::sanity;
use crate::templates;

/// How the notification step obtains its answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotifyChoice {
    /// Prompt the operator
    #[default]
    Ask,
    /// Skip without prompting
    Decline,
    /// Configure this recipient without prompting
    Email(String),
}

/// Answers and switches supplied up front
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub notify: NotifyChoice,
    /// `None` prompts the operator
    pub simulate_outage: Option<bool>,
    /// Announce file writes instead of performing them
    pub dry_run: bool,
}

/// Drives the setup steps against a command runner and a prompter
pub struct Setup<R: CommandRunner, P: Prompter> {
    profile: SetupProfile,
    paths: NutPaths,
    options: SetupOptions,
    runner: R,
    prompter: P,
}

impl<R: CommandRunner, P: Prompter> Setup<R, P> {
    pub fn new(profile: SetupProfile, options: SetupOptions, runner: R, prompter: P) -> Self {
        let paths = profile.paths();
        Self {
            profile,
            paths,
            options,
            runner,
            prompter,
        }
    }

    pub fn paths(&self) -> &NutPaths {
        &self.paths
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run the full sequence.
    pub fn run(&mut self) -> Result<()> {
        console::info("NUT virtual UPS setup for the lab.");
        tracing::info!(root = %self.paths.root().display(), dry_run = self.options.dry_run, "setup started");

        self.install_packages()?;
        self.configure_ups_conf()?;
        self.configure_upsd_conf()?;
        self.configure_upsd_users()?;
        self.configure_notifications()?;
        self.restart_server()?;
        self.verify_ups()?;
        self.simulate_outage()?;

        console::ok("Setup complete. Open nut-monitor to watch the virtual UPS.");
        tracing::info!("setup finished");
        Ok(())
    }

    /// `apt-get update` followed by installing the profile's packages.
    pub fn install_packages(&mut self) -> Result<()> {
        console::info(format!(
            "Installing required packages ({})...",
            self.profile.packages.join(", ")
        ));
        self.execute(&AptUpdateArgs)?;
        self.execute(&AptInstallArgs {
            packages: self.profile.packages.clone(),
        })?;
        Ok(())
    }

    /// Write `ups.conf` and the scenario script it points at.
    pub fn configure_ups_conf(&mut self) -> Result<()> {
        console::info("Configuring ups.conf and the emulated scenario script...");
        self.replace_file(&self.paths.ups_conf(), &templates::ups_conf(&self.profile))?;
        self.replace_file(&self.paths.scenario_script(), templates::scenario_script())?;
        console::ok("Virtual UPS configuration and simulation script ready.");
        Ok(())
    }

    /// Write `upsd.conf` so the server listens on the configured address.
    pub fn configure_upsd_conf(&mut self) -> Result<()> {
        console::info(format!(
            "Configuring upsd.conf to listen on {}:{}...",
            self.profile.listen_address, self.profile.listen_port
        ));
        self.replace_file(&self.paths.upsd_conf(), &templates::upsd_conf(&self.profile))?;
        Ok(())
    }

    /// Write `upsd.users` with the administrator account.
    pub fn configure_upsd_users(&mut self) -> Result<()> {
        console::info("Configuring upsd.users with the default user...");
        self.replace_file(&self.paths.upsd_users(), &templates::upsd_users(&self.profile))?;
        Ok(())
    }

    /// Optionally upsert the NOTIFYCMD directive into `upsmon.conf`.
    ///
    /// Returns whether the directive was written. Declining or giving an
    /// empty address skips the step.
    pub fn configure_notifications(&mut self) -> Result<bool> {
        console::info("Email notification setup (optional).");

        let recipient = match self.options.notify.clone() {
            NotifyChoice::Decline => {
                console::info("NOTIFYCMD skipped.");
                return Ok(false);
            }
            NotifyChoice::Email(address) => address.trim().to_string(),
            NotifyChoice::Ask => {
                if !self
                    .prompter
                    .confirm("Configure NOTIFYCMD notifications in upsmon.conf? [y/N]: ")
                {
                    console::info("NOTIFYCMD skipped.");
                    return Ok(false);
                }
                self.prompter
                    .ask("Destination email address (user@example.com): ")
            }
        };

        if recipient.is_empty() {
            console::warn("No email address given. NOTIFYCMD will not be configured.");
            return Ok(false);
        }

        if !sanity::binary_exists(&self.profile.mailer) {
            console::warn(format!(
                "Mail client {} not found; notifications will fail until it is installed.",
                self.profile.mailer
            ));
        }

        let line = templates::notifycmd_line(
            &recipient,
            &self.profile.notify_subject,
            &self.profile.mailer,
        );
        let path = self.paths.upsmon_conf();
        let current = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };
        let updated = upsert_directive(&current, &line);
        tracing::debug!(path = %path.display(), directive = %line, "upserting NOTIFYCMD");

        self.replace_file(&path, &updated)?;
        console::ok("Email notification settings applied.");
        console::info("An MTA (such as postfix or ssmtp) must be configured to deliver mail.");
        Ok(true)
    }

    /// Restart the NUT server; failure ends the run with guidance.
    pub fn restart_server(&mut self) -> Result<()> {
        let service = self.profile.service.clone();
        console::info(format!("Restarting the {} service...", service));

        let output = self.execute(&SystemctlArgs::new(ServiceAction::Restart, &service))?;
        if !output.success {
            console::error(format!(
                "Could not restart {}. Check {} (MODE=netserver).",
                service,
                self.paths.root().join("nut.conf").display()
            ));
            return Err(SetupError::ServiceRestart {
                service,
                exit_code: output.exit_code,
            });
        }

        console::ok(format!("{} restarted successfully.", service));
        Ok(())
    }

    /// Query the emulated UPS. Returns whether the query succeeded.
    pub fn verify_ups(&mut self) -> Result<bool> {
        console::info("Checking the virtual UPS status (upsc)...");
        let output = self.execute(&UpscArgs {
            target: self.profile.ups_target(),
        })?;
        console::info("If the UPS status is shown above, monitoring works.");
        Ok(output.success)
    }

    /// Optionally stop the server, wait for the operator and start it again.
    ///
    /// Returns whether the simulation ran.
    pub fn simulate_outage(&mut self) -> Result<bool> {
        console::info("Power outage simulation (optional).");

        let accepted = match self.options.simulate_outage {
            Some(answer) => answer,
            None => self
                .prompter
                .confirm(&format!("Simulate an outage of {}? [y/N]: ", self.profile.service)),
        };
        if !accepted {
            console::info("Simulation skipped.");
            return Ok(false);
        }

        let service = self.profile.service.clone();
        console::warn(format!("Stopping {} to simulate a failure...", service));
        self.execute(&SystemctlArgs::new(ServiceAction::Stop, &service))?;

        self.prompter
            .pause(&format!("Press Enter to start {} again...", service));

        self.execute(&SystemctlArgs::new(ServiceAction::Start, &service))?;
        console::ok("Outage simulation complete. Events can be observed in nut-monitor.");
        Ok(true)
    }

    fn execute(&mut self, args: &impl CommandArgs) -> Result<CommandOutput> {
        self.runner.run(&args.to_spec())
    }

    fn replace_file(&self, path: &Path, content: &str) -> Result<Option<PathBuf>> {
        if self.options.dry_run {
            console::info(format!(
                "[dry-run] Would back up and write {} ({} bytes)",
                path.display(),
                content.len()
            ));
            return Ok(None);
        }
        backup::replace_config_file(path, content)
    }
}
