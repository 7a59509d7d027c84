//! Error types for Linux I2C operations

use rfclk_core::error::Error as CoreError;
use thiserror::Error;

/// Linux I2C specific errors
#[derive(Debug, Error)]
pub enum LinuxI2cError {
    /// Failed to open device
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to bind the target address
    #[error("Could not set address 0x{addr:02X}: {source}")]
    BindFailed {
        addr: u8,
        #[source]
        source: nix::errno::Errno,
    },

    /// Write transaction failed
    #[error("I2C write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// Kernel accepted only part of a write transaction
    #[error("Short I2C write: {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },
}

impl LinuxI2cError {
    /// Core error this failure is reported as
    pub fn kind(&self) -> CoreError {
        match self {
            Self::OpenFailed { .. } => CoreError::BusOpenFailed,
            Self::BindFailed { .. } => CoreError::AddressBindFailed,
            Self::WriteFailed(_) | Self::ShortWrite { .. } => CoreError::WriteFailed,
        }
    }
}

impl From<LinuxI2cError> for CoreError {
    fn from(e: LinuxI2cError) -> Self {
        log::error!("linux_i2c: {}", e);
        e.kind()
    }
}

/// Result type for Linux I2C operations
pub type Result<T> = std::result::Result<T, LinuxI2cError>;
