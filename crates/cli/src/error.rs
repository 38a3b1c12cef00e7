//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: composition error (bad region, bad thresholds)
//! - 11: I/O error (snapshot, file write, stdin)
//! - 12: input error (bad palette, bad color, bad recipe file)
//! - 13: serialization error

use mondrian_core::MondrianError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A composition could not be started.
    Compose(MondrianError),
    /// Rasterizing, saving, or reading failed.
    Io(String),
    /// The user asked for something that does not exist or does not parse.
    Input(String),
    /// JSON output failed.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Compose(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Compose(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<MondrianError> for CliError {
    fn from(e: MondrianError) -> Self {
        if e.is_io() {
            return CliError::Io(e.to_string());
        }
        match e {
            MondrianError::InvalidPalette(_) | MondrianError::InvalidColor(_) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Compose(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
