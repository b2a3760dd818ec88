//! nut-setup - Main entry point
//!
//! Parses the command line, runs the requested step(s) and turns the outcome
//! into the process exit code.

use nut_setup::cli::{Cli, Commands};
use nut_setup::config::SetupProfile;
use nut_setup::console::{self, StdinPrompter};
use nut_setup::error::Result;
use nut_setup::logging;
use nut_setup::sanity;
use nut_setup::setup::Setup;
use nut_setup::SystemCommandRunner;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);
    debug!("CLI arguments parsed: {:?}", cli);

    if let Err(err) = run(&cli) {
        if !err.is_reported() {
            console::error(format!("Unexpected error: {}", err));
        }
        error!("nut-setup failed: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.command();

    if let Commands::Validate { profile } = &command {
        info!("Validating setup profile: {:?}", profile);
        SetupProfile::load_from_file(profile)?.validate()?;
        console::ok(format!("Profile is valid: {}", profile.display()));
        return Ok(());
    }

    // Everything except the read-only status query needs root before any side effect
    if command != Commands::Status {
        sanity::require_root()?;
    }

    let profile = cli.profile()?;
    let mut setup = Setup::new(
        profile,
        cli.options(),
        SystemCommandRunner::new(cli.dry_run),
        StdinPrompter,
    );

    match command {
        Commands::Setup => setup.run(),
        Commands::Notify => setup.configure_notifications().map(|_| ()),
        Commands::Status => setup.verify_ups().map(|_| ()),
        Commands::Simulate => setup.simulate_outage().map(|_| ()),
        Commands::Validate { .. } => Ok(()),
    }
}
