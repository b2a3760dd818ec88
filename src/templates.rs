//! Literal contents of the generated NUT files.
//!
//! With a default `SetupProfile` every function returns the exact lab
//! template; the profile only substitutes names, addresses and credentials.

use crate::config::{SCENARIO_FILE_NAME, SetupProfile};

/// `ups.conf` stanza declaring a dummy-ups device that replays the scenario script.
pub fn ups_conf(profile: &SetupProfile) -> String {
    format!(
        "[{name}]\n    driver = dummy-ups\n    port = {port}\n    # mode=dummy-loop\n    desc = \"SAI Virtual\"\n",
        name = profile.ups_name,
        port = SCENARIO_FILE_NAME,
    )
}

/// Scenario replayed by dummy-ups: the UPS goes on battery, drains and
/// raises temperature alarms along a fixed timeline.
pub fn scenario_script() -> &'static str {
    concat!(
        "battery.runtime = 1800 # Tiempo de batería simulado en segundos (30 minutos)\n",
        "battery.mfr = \"Emulated\"\n",
        "battery.model = \"Virtual UPS\"\n",
        "battery.charge: 100\n",
        "ups.status: OL\n",
        "TIMER 10\n",
        "ups.status: 0B\n",
        "TIMER 4\n",
        "battery.charge: 80\n",
        "TIMER 2\n",
        "battery.charge: 60\n",
        "TIMER 2\n",
        "battery.charge: 40\n",
        "TIMER 2\n",
        "ALARM [UPS demasiado caliente para cargar]\n",
        "TIMER 5\n",
        "ALARM [Circuito UPS sobrecalentado]\n",
        "TIMER 5\n",
        "ALARM [UPS demasiado frío para cargar]\n",
        "TIMER 4\n",
        "battery.charge: 20\n",
        "TIMER 4\n",
        "battery.charge: 5\n",
        "TIMER 4\n",
    )
}

/// `upsd.conf`: a single LISTEN directive.
pub fn upsd_conf(profile: &SetupProfile) -> String {
    format!("LISTEN {} {}\n", profile.listen_address, profile.listen_port)
}

/// `upsd.users`: one administrator allowed to set variables, run any
/// instant command and act as upsmon master.
pub fn upsd_users(profile: &SetupProfile) -> String {
    format!(
        "[{}]\npassword = {}\nactions = SET\ninstcmds = ALL\nupsmon master\n",
        profile.admin_user, profile.admin_password
    )
}

/// Build the `NOTIFYCMD` directive for `upsmon.conf`.
pub fn notifycmd_line(recipient: &str, subject: &str, mailer: &str) -> String {
    format!("NOTIFYCMD {} -s \"{}\" {}", mailer, subject, recipient)
}
