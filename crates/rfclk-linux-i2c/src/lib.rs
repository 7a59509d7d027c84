//! rfclk-linux-i2c - Linux i2c-dev support
//!
//! This crate drives the board's clock chips through the Linux `i2c-dev`
//! interface, i.e. the `/dev/i2c-N` character devices.
//!
//! # Example
//!
//! ```no_run
//! use rfclk_core::bridge::BridgeSynthesizer;
//! use rfclk_core::bus::BusId;
//! use rfclk_core::programmer::Lmx2594Programmer;
//! use rfclk_core::regs::Lmx2594Regs;
//! use rfclk_linux_i2c::LinuxI2c;
//!
//! let regs = Lmx2594Regs::new([0; 113]);
//! let mut programmer = Lmx2594Programmer::new(LinuxI2c::default(), BridgeSynthesizer::new());
//! programmer.program(BusId(12), &regs)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with i2c-dev support enabled (`CONFIG_I2C_CHARDEV`)
//! - Read/write access to `/dev/i2c-N`
//! - Callers must serialize programming calls on the same bus

pub mod device;
pub mod error;

// Re-exports
pub use device::{LinuxI2c, LinuxI2cConfig, LinuxI2cDevice};
pub use error::{LinuxI2cError, Result};

use rfclk_core::bridge::{BridgeJitterCleaner, BridgeSynthesizer};
use rfclk_core::bus::BusId;
use rfclk_core::programmer::{program_lmk04208, program_lmx2594};
use rfclk_core::regs::{Lmk04208Regs, Lmx2594Regs, LMK04208_REG_COUNT, LMX2594_REG_COUNT};
use rfclk_core::status_code;

/// Write an LMK04208 image on `/dev/i2c-<bus>` and return the status code
///
/// `0` means the whole image was written; see
/// [`rfclk_core::Error::status_code`] for the failure codes.
pub fn write_lmk04208_regs(bus: u32, regs: &[u32; LMK04208_REG_COUNT]) -> i32 {
    let config = BridgeJitterCleaner::new(LinuxI2c::default());
    status_code(&program_lmk04208(
        config,
        BusId(bus),
        &Lmk04208Regs::new(*regs),
    ))
}

/// Write an LMX2594 image on `/dev/i2c-<bus>` and return the status code
///
/// Returns `1` if the bridge address could not be bound.
pub fn write_lmx2594_regs(bus: u32, regs: &[u32; LMX2594_REG_COUNT]) -> i32 {
    status_code(&program_lmx2594(
        LinuxI2c::default(),
        BridgeSynthesizer::new(),
        BusId(bus),
        &Lmx2594Regs::new(*regs),
    ))
}
