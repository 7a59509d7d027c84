//! I2C bus abstractions
//!
//! These traits describe the byte-oriented bus-transaction interface the
//! programmers drive. A bus backend (Linux `i2c-dev`, the in-memory dummy)
//! implements [`I2cBus`] to open devices and [`I2cDevice`] for the opened
//! handle.
//!
//! A device handle is released by dropping it. Backends must close their OS
//! handle in `Drop`, so a handle is closed exactly once on every exit path of
//! whoever owns it.

use core::fmt;
use core::fmt::Write;

use crate::error::{Error, Result};

/// Maximum length of a rendered bus device path (`/dev/i2c-4294967295`)
pub const DEVICE_PATH_LEN: usize = 24;

/// Identifies one I2C bus instance on the host (`/dev/i2c-<N>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(pub u32);

impl BusId {
    /// Render the device node path for this bus
    pub fn device_path(&self) -> heapless::String<DEVICE_PATH_LEN> {
        let mut path = heapless::String::new();
        // 9 + 10 digits always fits
        let _ = write!(path, "/dev/i2c-{}", self.0);
        path
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/dev/i2c-{}", self.0)
    }
}

impl From<u32> for BusId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// 7-bit I2C target address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// SC18IS602 I2C-to-SPI bridge in front of the clock chips
    pub const SC18IS602: Self = Self(0x2F);

    /// Create an address, rejecting anything wider than 7 bits
    pub const fn new(addr: u8) -> Result<Self> {
        if addr > 0x7F {
            return Err(Error::InvalidAddress(addr));
        }
        Ok(Self(addr))
    }

    /// Get the raw address value
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// How to claim a target address on an open bus device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindMode {
    /// Fail if a kernel driver already claims the address (`I2C_SLAVE`)
    Exclusive,
    /// Claim the address even if a kernel driver uses it (`I2C_SLAVE_FORCE`)
    Force,
}

/// An I2C bus that can open device handles
pub trait I2cBus {
    /// Handle type returned by [`I2cBus::open`]
    type Device: I2cDevice;

    /// Open the device node for `bus` with read/write access
    fn open(&mut self, bus: BusId) -> Result<Self::Device>;
}

/// An open I2C bus device handle
pub trait I2cDevice {
    /// Bind this handle to a target address; subsequent writes go there
    fn bind_address(&mut self, addr: DeviceAddress, mode: BindMode) -> Result<()>;

    /// Issue one complete write transaction to the bound address
    ///
    /// A short write is an error; implementations must never report success
    /// for a partial transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Delay for the specified number of microseconds
    fn delay_us(&mut self, us: u32);
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Device = B::Device;

    fn open(&mut self, bus: BusId) -> Result<Self::Device> {
        (**self).open(bus)
    }
}

impl<D: I2cDevice + ?Sized> I2cDevice for &mut D {
    fn bind_address(&mut self, addr: DeviceAddress, mode: BindMode) -> Result<()> {
        (**self).bind_address(addr, mode)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_path() {
        assert_eq!(BusId(5).device_path().as_str(), "/dev/i2c-5");
        assert_eq!(BusId(0).device_path().as_str(), "/dev/i2c-0");
        assert_eq!(
            BusId(u32::MAX).device_path().as_str(),
            "/dev/i2c-4294967295"
        );
    }

    #[test]
    fn test_address_range() {
        assert_eq!(DeviceAddress::new(0x2F), Ok(DeviceAddress::SC18IS602));
        assert_eq!(DeviceAddress::new(0x7F).map(|a| a.get()), Ok(0x7F));
        assert_eq!(DeviceAddress::new(0x80), Err(Error::InvalidAddress(0x80)));
    }
}
