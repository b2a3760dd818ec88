//! Pre-flight checks for the runtime environment
//!
//! - Running with root privileges (EUID 0), required before any side effect
//! - Presence of optional helper binaries (the mail client used by NOTIFYCMD)

use std::path::Path;
use std::process::Command;

use crate::console;
use crate::error::{Result, SetupError};

/// Environment variable that skips the root check (development only)
pub const SKIP_ROOT_ENV: &str = "NUT_SETUP_SKIP_ROOT_CHECK";

/// Check if running as root (EUID 0)
pub fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Skip root check (for development/testing)
/// Set NUT_SETUP_SKIP_ROOT_CHECK=1 to skip
pub fn should_skip_root_check() -> bool {
    std::env::var(SKIP_ROOT_ENV)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Fail with `PermissionDenied` unless running as root.
pub fn require_root() -> Result<()> {
    check_root(is_running_as_root(), should_skip_root_check())
}

fn check_root(is_root: bool, skip: bool) -> Result<()> {
    if is_root {
        tracing::debug!("Root privileges confirmed");
        return Ok(());
    }
    if skip {
        tracing::warn!("Root check skipped ({}=1)", SKIP_ROOT_ENV);
        return Ok(());
    }
    let err = SetupError::PermissionDenied;
    console::error(err.to_string());
    Err(err)
}

/// Check if a binary is available, either as a path or through PATH
pub fn binary_exists(name: &str) -> bool {
    if name.contains('/') {
        return Path::new(name).is_file();
    }
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_exists_bash() {
        assert!(binary_exists("bash"), "bash should be available");
    }

    #[test]
    fn test_binary_exists_nonexistent() {
        assert!(!binary_exists("this_binary_definitely_does_not_exist_12345"));
        assert!(!binary_exists("/nonexistent/bin/mail"));
    }

    #[test]
    fn test_check_root() {
        assert!(check_root(true, false).is_ok());
        assert!(check_root(false, true).is_ok());
        assert!(matches!(
            check_root(false, false),
            Err(SetupError::PermissionDenied)
        ));
    }
}
