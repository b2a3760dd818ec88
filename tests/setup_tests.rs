//! Tests for the setup sequence
//!
//! These tests drive `Setup` with a `RecordingRunner` and a
//! `ScriptedPrompter` against a temporary configuration root, verifying:
//! - Command order and failure policy
//! - Generated files and backups
//! - Interactive answers (decline, empty input, preset answers)

use nut_setup::command_runner::{OnFailure, OutputMode, RecordingRunner};
use nut_setup::config::SetupProfile;
use nut_setup::console::ScriptedPrompter;
use nut_setup::error::SetupError;
use nut_setup::setup::{NotifyChoice, Setup, SetupOptions};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn profile_at(root: &Path) -> SetupProfile {
    SetupProfile {
        config_root: root.to_path_buf(),
        ..SetupProfile::default()
    }
}

fn backups_of(dir: &Path, name: &str) -> Vec<String> {
    let prefix = format!("{}.bak-", name);
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with(&prefix))
        .collect()
}

const FULL_SEQUENCE: [&str; 6] = [
    "apt-get update",
    "apt-get install -y nut nut-monitor",
    "systemctl restart nut-server",
    "upsc emulated_ups@localhost",
    "systemctl stop nut-server",
    "systemctl start nut-server",
];

// =============================================================================
// Full Sequence Tests
// =============================================================================

#[test]
fn test_full_run_fresh_root() {
    let dir = tempdir().unwrap();
    let prompter = ScriptedPrompter::new(["s", "ops@example.com", "s", ""]);
    let mut setup = Setup::new(
        profile_at(dir.path()),
        SetupOptions::default(),
        RecordingRunner::new(),
        prompter,
    );

    setup.run().expect("setup should succeed");

    assert_eq!(setup.runner().command_lines(), FULL_SEQUENCE.to_vec());

    let paths = setup.paths().clone();
    assert_eq!(
        fs::read_to_string(paths.ups_conf()).unwrap(),
        "[emulated_ups]\n    driver = dummy-ups\n    port = emulated_ups.seq\n    # mode=dummy-loop\n    desc = \"SAI Virtual\"\n"
    );
    assert_eq!(fs::read_to_string(paths.upsd_conf()).unwrap(), "LISTEN 127.0.0.1 3493\n");
    assert!(fs::read_to_string(paths.upsd_users())
        .unwrap()
        .starts_with("[admin]\npassword = admin_password\n"));
    assert!(fs::read_to_string(paths.scenario_script())
        .unwrap()
        .contains("ups.status: OL\nTIMER 10\n"));
    assert_eq!(
        fs::read_to_string(paths.upsmon_conf()).unwrap(),
        "NOTIFYCMD /usr/bin/mail -s \"Alerta SAI: Evento de suministro eléctrico\" ops@example.com\n"
    );

    // Nothing existed before, so nothing was backed up
    let backups: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().contains(".bak-"))
        .collect();
    assert!(backups.is_empty());

    assert_eq!(setup.prompter().asked().len(), 4);
}

#[test]
fn test_full_run_declining_everything() {
    let dir = tempdir().unwrap();
    let mut setup = Setup::new(
        profile_at(dir.path()),
        SetupOptions::default(),
        RecordingRunner::new(),
        ScriptedPrompter::new(["n", "n"]),
    );

    setup.run().unwrap();

    assert_eq!(setup.runner().command_lines(), FULL_SEQUENCE[..4].to_vec());
    assert!(!setup.paths().upsmon_conf().exists());
}

#[test]
fn test_rerun_backs_up_existing_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ups.conf"), "[old]\n").unwrap();
    fs::write(dir.path().join("upsd.conf"), "LISTEN 0.0.0.0 3493\n").unwrap();
    fs::write(dir.path().join("upsd.users"), "[old]\n").unwrap();
    fs::write(
        dir.path().join("upsmon.conf"),
        "MONITOR emulated_ups@localhost 1 admin admin_password master\nNOTIFYCMD /bin/old -s \"x\" a@b.com\n",
    )
    .unwrap();

    let options = SetupOptions {
        notify: NotifyChoice::Email("c@d.com".to_string()),
        simulate_outage: Some(false),
        dry_run: false,
    };
    let mut setup = Setup::new(
        profile_at(dir.path()),
        options,
        RecordingRunner::new(),
        ScriptedPrompter::default(),
    );
    setup.run().unwrap();

    for name in ["ups.conf", "upsd.conf", "upsd.users", "upsmon.conf"] {
        let backups = backups_of(dir.path(), name);
        assert_eq!(backups.len(), 1, "expected one backup of {}", name);
    }
    let ups_backup = dir.path().join(&backups_of(dir.path(), "ups.conf")[0]);
    assert_eq!(fs::read_to_string(ups_backup).unwrap(), "[old]\n");

    assert_eq!(
        fs::read_to_string(dir.path().join("upsmon.conf")).unwrap(),
        "MONITOR emulated_ups@localhost 1 admin admin_password master\nNOTIFYCMD /usr/bin/mail -s \"Alerta SAI: Evento de suministro eléctrico\" c@d.com\n"
    );
    assert!(setup.prompter().asked().is_empty());
}

// =============================================================================
// Failure Policy Tests
// =============================================================================

#[test]
fn test_install_failure_stops_before_writing() {
    let dir = tempdir().unwrap();
    let mut setup = Setup::new(
        profile_at(dir.path()),
        SetupOptions::default(),
        RecordingRunner::new().fail_with("apt-get update", 100),
        ScriptedPrompter::default(),
    );

    let err = setup.run().unwrap_err();
    assert!(matches!(err, SetupError::CommandFailed { exit_code: Some(100), .. }));
    assert_eq!(err.exit_code(), 100);
    assert_eq!(setup.runner().command_lines(), vec!["apt-get update"]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_restart_failure_keeps_written_files() {
    let dir = tempdir().unwrap();
    let mut setup = Setup::new(
        profile_at(dir.path()),
        SetupOptions::default(),
        RecordingRunner::new().fail_with("systemctl restart nut-server", 1),
        ScriptedPrompter::new(["n"]),
    );

    let err = setup.run().unwrap_err();
    assert!(matches!(err, SetupError::ServiceRestart { .. }));
    assert_eq!(err.exit_code(), 1);

    // No verification or simulation after a failed restart
    assert_eq!(setup.runner().command_lines(), FULL_SEQUENCE[..3].to_vec());
    assert!(setup.paths().ups_conf().exists());
    assert!(setup.paths().upsd_users().exists());
}

#[test]
fn test_status_failure_is_tolerated() {
    let dir = tempdir().unwrap();
    let mut setup = Setup::new(
        profile_at(dir.path()),
        SetupOptions {
            notify: NotifyChoice::Decline,
            simulate_outage: Some(true),
            dry_run: false,
        },
        RecordingRunner::new()
            .fail_with("upsc emulated_ups@localhost", 1)
            .fail_with("systemctl start nut-server", 3),
        ScriptedPrompter::new([""]),
    );

    setup.run().unwrap();
    assert_eq!(setup.runner().command_lines(), FULL_SEQUENCE.to_vec());
}

#[test]
fn test_command_policies() {
    let dir = tempdir().unwrap();
    let mut setup = Setup::new(
        profile_at(dir.path()),
        SetupOptions {
            notify: NotifyChoice::Decline,
            simulate_outage: Some(true),
            dry_run: false,
        },
        RecordingRunner::new(),
        ScriptedPrompter::default(),
    );
    setup.run().unwrap();

    let calls = setup.runner().calls();
    let policies: Vec<(OutputMode, OnFailure)> =
        calls.iter().map(|c| (c.output, c.on_failure)).collect();
    assert_eq!(
        policies,
        vec![
            (OutputMode::Stream, OnFailure::Abort),
            (OutputMode::Stream, OnFailure::Abort),
            (OutputMode::Capture, OnFailure::Continue),
            (OutputMode::Stream, OnFailure::Continue),
            (OutputMode::Stream, OnFailure::Continue),
            (OutputMode::Stream, OnFailure::Continue),
        ]
    );
}

// =============================================================================
// Profile Tests
// =============================================================================

#[test]
fn test_custom_profile_flows_into_commands_and_files() {
    let dir = tempdir().unwrap();
    let profile = SetupProfile {
        config_root: dir.path().to_path_buf(),
        packages: vec!["nut".to_string()],
        service: "nut-driver".to_string(),
        ups_name: "labups".to_string(),
        listen_port: 3500,
        ..SetupProfile::default()
    };
    let mut setup = Setup::new(
        profile,
        SetupOptions {
            notify: NotifyChoice::Decline,
            simulate_outage: Some(false),
            dry_run: false,
        },
        RecordingRunner::new(),
        ScriptedPrompter::default(),
    );
    setup.run().unwrap();

    assert_eq!(
        setup.runner().command_lines(),
        vec![
            "apt-get update",
            "apt-get install -y nut",
            "systemctl restart nut-driver",
            "upsc labups@localhost",
        ]
    );
    assert!(fs::read_to_string(dir.path().join("ups.conf"))
        .unwrap()
        .starts_with("[labups]\n"));
    assert_eq!(
        fs::read_to_string(dir.path().join("upsd.conf")).unwrap(),
        "LISTEN 127.0.0.1 3500\n"
    );
}
