//! Setup profile and configuration paths.
//!
//! `NutPaths` derives every file location from a single configuration root.
//! `SetupProfile` carries the tunable values used by the templates and the
//! setup sequence; it can be loaded from a JSON file and every field falls
//! back to the lab defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

/// Default NUT configuration directory
pub const DEFAULT_CONFIG_ROOT: &str = "/etc/nut";

/// Default subject of notification mails
pub const DEFAULT_NOTIFY_SUBJECT: &str = "Alerta SAI: Evento de suministro eléctrico";

/// Default mail client used by NOTIFYCMD
pub const DEFAULT_MAILER: &str = "/usr/bin/mail";

/// Paths of the files managed under the configuration root.
///
/// All paths are direct children of `root`; nothing outside it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutPaths {
    root: PathBuf,
}

impl NutPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Driver configuration (`ups.conf`)
    pub fn ups_conf(&self) -> PathBuf {
        self.root.join("ups.conf")
    }

    /// Daemon listen configuration (`upsd.conf`)
    pub fn upsd_conf(&self) -> PathBuf {
        self.root.join("upsd.conf")
    }

    /// User/permission configuration (`upsd.users`)
    pub fn upsd_users(&self) -> PathBuf {
        self.root.join("upsd.users")
    }

    /// Monitor and notification configuration (`upsmon.conf`)
    pub fn upsmon_conf(&self) -> PathBuf {
        self.root.join("upsmon.conf")
    }

    /// Scenario script replayed by the dummy-ups driver
    pub fn scenario_script(&self) -> PathBuf {
        self.root.join(SCENARIO_FILE_NAME)
    }
}

impl Default for NutPaths {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_ROOT)
    }
}

/// File name of the emulated UPS scenario, referenced by `ups.conf`.
pub const SCENARIO_FILE_NAME: &str = "emulated_ups.seq";

/// Tunable values for a setup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupProfile {
    pub config_root: PathBuf,
    pub packages: Vec<String>,
    pub service: String,
    pub ups_name: String,
    pub status_host: String,
    pub listen_address: String,
    pub listen_port: u16,
    pub admin_user: String,
    pub admin_password: String,
    pub mailer: String,
    pub notify_subject: String,
}

impl Default for SetupProfile {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from(DEFAULT_CONFIG_ROOT),
            packages: vec!["nut".to_string(), "nut-monitor".to_string()],
            service: "nut-server".to_string(),
            ups_name: "emulated_ups".to_string(),
            status_host: "localhost".to_string(),
            listen_address: "127.0.0.1".to_string(),
            listen_port: 3493,
            admin_user: "admin".to_string(),
            admin_password: "admin_password".to_string(),
            mailer: DEFAULT_MAILER.to_string(),
            notify_subject: DEFAULT_NOTIFY_SUBJECT.to_string(),
        }
    }
}

impl SetupProfile {
    /// Load a profile from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SetupError::config(format!("Failed to read profile {}: {}", path.display(), e))
        })?;

        let profile: Self = serde_json::from_str(&content)?;
        tracing::debug!("Loaded setup profile from {}", path.display());
        Ok(profile)
    }

    /// Paths derived from `config_root`
    pub fn paths(&self) -> NutPaths {
        NutPaths::new(&self.config_root)
    }

    /// `<ups>@<host>` identifier passed to `upsc`
    pub fn ups_target(&self) -> String {
        format!("{}@{}", self.ups_name, self.status_host)
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if !self.config_root.is_absolute() {
            return Err(SetupError::config(format!(
                "config_root must be an absolute path, got {}",
                self.config_root.display()
            )));
        }

        if self.packages.is_empty() || self.packages.iter().any(|p| p.trim().is_empty()) {
            return Err(SetupError::config("packages must list at least one non-empty name"));
        }

        if self.service.trim().is_empty() {
            return Err(SetupError::config("service must be specified"));
        }

        // The UPS name is used as an ups.conf section header
        let ups_name = self.ups_name.trim();
        if ups_name.is_empty() {
            return Err(SetupError::config("ups_name must be specified"));
        }
        if ups_name.contains(|c: char| c.is_whitespace() || c == '[' || c == ']' || c == '@') {
            return Err(SetupError::config(
                "ups_name cannot contain whitespace, brackets or '@'",
            ));
        }

        if self.status_host.trim().is_empty() {
            return Err(SetupError::config("status_host must be specified"));
        }

        if self.listen_port == 0 {
            return Err(SetupError::config("listen_port must be non-zero"));
        }

        if self.admin_user.trim().is_empty() {
            return Err(SetupError::config("admin_user must be specified"));
        }

        if self.admin_password.is_empty() || self.admin_password.contains(char::is_whitespace) {
            return Err(SetupError::config(
                "admin_password must be non-empty and cannot contain whitespace",
            ));
        }

        if self.mailer.trim().is_empty() {
            return Err(SetupError::config("mailer must be specified"));
        }

        Ok(())
    }
}
