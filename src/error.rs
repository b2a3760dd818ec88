//! Error handling module for nut-setup
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Steps return these errors up the call chain; only the binary entry point
//! turns them into a process exit code.

use thiserror::Error;

/// Main error type for nut-setup
#[derive(Error, Debug)]
pub enum SetupError {
    /// Not running with root privileges
    #[error("This tool must be run as root (sudo)")]
    PermissionDenied,

    /// An external command exited non-zero (or was killed by a signal)
    #[error("Command failed with exit code {}: {command}", display_code(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// The monitoring service could not be restarted
    #[error("Could not restart {service} (exit code {})", display_code(.exit_code))]
    ServiceRestart {
        service: String,
        exit_code: Option<i32>,
    },

    /// IO errors (file operations, console, process spawning)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON deserialization errors for setup profiles
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for nut-setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl SetupError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a command failure from a rendered command line and exit status
    pub fn command_failed(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
        }
    }

    /// Process exit code for this error.
    ///
    /// Command failures mirror the subprocess's code; everything else
    /// (including signal-terminated subprocesses) exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { exit_code, .. } | Self::ServiceRestart { exit_code, .. } => {
                match exit_code {
                    Some(code) if *code != 0 => *code,
                    _ => 1,
                }
            }
            _ => 1,
        }
    }

    /// Whether the failing step already printed this error to the console.
    ///
    /// Anything else is unexpected and is reported by `main`.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::CommandFailed { .. } | Self::ServiceRestart { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SetupError::config("config_root must be absolute");
        assert_eq!(
            err.to_string(),
            "Configuration error: config_root must be absolute"
        );

        let err = SetupError::command_failed("apt-get update", Some(100));
        assert_eq!(
            err.to_string(),
            "Command failed with exit code 100: apt-get update"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SetupError::PermissionDenied.exit_code(), 1);
        assert_eq!(SetupError::command_failed("x", Some(42)).exit_code(), 42);
        assert_eq!(SetupError::command_failed("x", None).exit_code(), 1);
        let err = SetupError::ServiceRestart {
            service: "nut-server".to_string(),
            exit_code: Some(5),
        };
        assert_eq!(err.exit_code(), 5);
        assert!(err.is_reported());
        assert!(!SetupError::config("bad").is_reported());
    }
}
