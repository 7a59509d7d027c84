//! rfclk-core - Core library for RF clock register programming
//!
//! This crate pushes pre-computed register images to the clock chips of an
//! RF data-converter board: an LMK04208 jitter cleaner and LMX2594 wideband
//! synthesizers, both reached through an SC18IS602 I2C-to-SPI bridge. It is
//! designed to be `no_std` compatible; the host-side bus lives in backend
//! crates that implement the [`bus`] traits.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for the core error type
//!
//! # Example
//!
//! ```ignore
//! use rfclk_core::bridge::BridgeSynthesizer;
//! use rfclk_core::bus::BusId;
//! use rfclk_core::programmer::Lmx2594Programmer;
//!
//! let mut programmer = Lmx2594Programmer::new(bus, BridgeSynthesizer::new());
//! programmer.program(BusId(5), &regs)?;
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod bus;
pub mod error;
pub mod programmer;
pub mod regs;
pub mod vendor;

pub use error::{status_code, Error, Result};
