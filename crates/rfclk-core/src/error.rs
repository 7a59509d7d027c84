//! Error types for rfclk-core
//!
//! This module provides a no_std compatible error type shared by the
//! programmers, the vendor routines and every bus backend. Each variant maps
//! onto a stable integer status code for callers that only speak integers.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Bus errors
    /// The bus device file could not be opened (missing bus, permission)
    BusOpenFailed,
    /// Binding the open device to the target address failed
    AddressBindFailed,
    /// A register write transaction failed or was incomplete
    WriteFailed,

    // Caller contract errors
    /// Register image has the wrong number of words for the chip
    RegisterCountMismatch {
        /// Number of words the chip requires
        expected: usize,
        /// Number of words supplied
        found: usize,
    },
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
}

impl Error {
    /// Integer status reported upward for this error
    ///
    /// `0` is reserved for success; `1` is the address bind failure code the
    /// synthesizer path has always reported.
    pub const fn status_code(&self) -> i32 {
        match self {
            Self::AddressBindFailed => 1,
            Self::BusOpenFailed => 2,
            Self::WriteFailed => 3,
            Self::RegisterCountMismatch { .. } => 4,
            Self::InvalidAddress(_) => 5,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusOpenFailed => write!(f, "failed to open I2C bus device"),
            Self::AddressBindFailed => write!(f, "could not set I2C device address"),
            Self::WriteFailed => write!(f, "register write failed"),
            Self::RegisterCountMismatch { expected, found } => write!(
                f,
                "register image has {} words, expected {}",
                found, expected
            ),
            Self::InvalidAddress(addr) => {
                write!(f, "invalid 7-bit I2C address 0x{:02X}", addr)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;

/// Collapse a programming result into the integer status contract
pub fn status_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.status_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(status_code(&Err(Error::AddressBindFailed)), 1);
        assert_eq!(status_code(&Err(Error::BusOpenFailed)), 2);
        assert_eq!(status_code(&Err(Error::WriteFailed)), 3);
        assert_eq!(
            status_code(&Err(Error::RegisterCountMismatch {
                expected: 26,
                found: 25
            })),
            4
        );
        assert_eq!(status_code(&Err(Error::InvalidAddress(0x80))), 5);
    }

    #[test]
    fn test_failures_never_report_success() {
        let errors = [
            Error::BusOpenFailed,
            Error::AddressBindFailed,
            Error::WriteFailed,
            Error::RegisterCountMismatch {
                expected: 113,
                found: 0,
            },
            Error::InvalidAddress(0xFF),
        ];
        for e in errors {
            assert_ne!(e.status_code(), 0, "{:?}", e);
        }
    }
}
