//! CLI error type and exit codes

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command line front-end
#[derive(Debug, Error)]
pub enum CliError {
    /// Programming failed on the bus
    #[error(transparent)]
    Program(#[from] rfclk_core::Error),

    /// Register file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadRegs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Register file contains something that is not a word
    #[error("{path}:{line}: invalid register word '{token}'")]
    ParseRegs {
        path: PathBuf,
        line: usize,
        token: String,
    },

    /// Backend name not compiled in
    #[error("Unknown backend '{name}' (available: {available})")]
    UnknownBackend { name: String, available: String },

    /// Backend option value could not be parsed
    #[error("Invalid value for option {key}: '{value}'")]
    InvalidOption { key: String, value: String },
}

/// `sysexits.h` EX_DATAERR
const EX_DATAERR: i32 = 65;
/// `sysexits.h` EX_NOINPUT
const EX_NOINPUT: i32 = 66;
/// `sysexits.h` EX_USAGE
const EX_USAGE: i32 = 64;

impl CliError {
    /// Process exit code for this error
    ///
    /// Programming failures exit with the library status code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Program(e) => e.status_code(),
            Self::ReadRegs { .. } => EX_NOINPUT,
            Self::ParseRegs { .. } => EX_DATAERR,
            Self::UnknownBackend { .. } | Self::InvalidOption { .. } => EX_USAGE,
        }
    }
}
