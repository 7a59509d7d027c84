//! Linux I2C device implementation
//!
//! This module provides `LinuxI2c`, an `I2cBus` that opens
//! `/dev/i2c-<N>` character devices, and `LinuxI2cDevice`, the open handle.

use crate::error::{LinuxI2cError, Result};

use rfclk_core::bus::{BindMode, BusId, DeviceAddress, I2cBus, I2cDevice};
use rfclk_core::error::Result as CoreResult;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

/// Linux i2c-dev ioctl constants
mod ioctl {
    use nix::ioctl_write_int_bad;

    /// Use this target address
    const I2C_SLAVE: u16 = 0x0703;
    /// Use this target address, even if it is already in use by a driver
    const I2C_SLAVE_FORCE: u16 = 0x0706;

    ioctl_write_int_bad!(i2c_slave, I2C_SLAVE);
    ioctl_write_int_bad!(i2c_slave_force, I2C_SLAVE_FORCE);
}

/// Configuration for opening Linux I2C devices
#[derive(Debug, Clone, Default)]
pub struct LinuxI2cConfig {
    /// Directory holding the `i2c-<N>` nodes (default: `/dev`)
    pub dev_root: Option<PathBuf>,
}

impl LinuxI2cConfig {
    /// Create a configuration using `/dev`
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for device nodes under `dev_root` instead of `/dev`
    pub fn with_dev_root(mut self, dev_root: impl Into<PathBuf>) -> Self {
        self.dev_root = Some(dev_root.into());
        self
    }

    /// Device node path for `bus`
    pub fn device_path(&self, bus: BusId) -> PathBuf {
        match &self.dev_root {
            Some(root) => root.join(format!("i2c-{}", bus.0)),
            None => PathBuf::from(bus.device_path().as_str()),
        }
    }
}

/// Linux I2C bus using the i2c-dev interface
#[derive(Debug, Clone, Default)]
pub struct LinuxI2c {
    config: LinuxI2cConfig,
}

impl LinuxI2c {
    /// Create a bus with the given configuration
    pub fn new(config: LinuxI2cConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &LinuxI2cConfig {
        &self.config
    }
}

impl I2cBus for LinuxI2c {
    type Device = LinuxI2cDevice;

    fn open(&mut self, bus: BusId) -> CoreResult<Self::Device> {
        let path = self.config.device_path(bus);
        Ok(LinuxI2cDevice::open(&path)?)
    }
}

/// Open i2c-dev handle
///
/// The file descriptor is closed when this value is dropped.
pub struct LinuxI2cDevice {
    /// File handle for the i2c-dev node
    file: File,
    /// Path the handle was opened from
    path: PathBuf,
}

impl LinuxI2cDevice {
    /// Open an i2c-dev node for read/write access
    pub fn open(path: &Path) -> Result<Self> {
        log::debug!("linux_i2c: Opening device {}", path.display());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| LinuxI2cError::OpenFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the open node
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bind the target address with `I2C_SLAVE` or `I2C_SLAVE_FORCE`
    pub fn set_address(&mut self, addr: DeviceAddress, mode: BindMode) -> Result<()> {
        let fd = self.file.as_raw_fd();
        let value = libc::c_int::from(addr.get());
        let ret = unsafe {
            match mode {
                BindMode::Exclusive => ioctl::i2c_slave(fd, value),
                BindMode::Force => ioctl::i2c_slave_force(fd, value),
            }
        };
        ret.map_err(|e| LinuxI2cError::BindFailed {
            addr: addr.get(),
            source: e,
        })?;

        log::debug!(
            "linux_i2c: {} bound to {} ({:?})",
            self.path.display(),
            addr,
            mode
        );
        Ok(())
    }

    /// Issue one write transaction
    ///
    /// i2c-dev turns each write(2) into a single I2C message, so the buffer
    /// must go out in one call; a short count is a failed transaction.
    pub fn write_message(&mut self, bytes: &[u8]) -> Result<()> {
        let written = self
            .file
            .write(bytes)
            .map_err(LinuxI2cError::WriteFailed)?;
        if written != bytes.len() {
            return Err(LinuxI2cError::ShortWrite {
                expected: bytes.len(),
                written,
            });
        }
        Ok(())
    }
}

impl I2cDevice for LinuxI2cDevice {
    fn bind_address(&mut self, addr: DeviceAddress, mode: BindMode) -> CoreResult<()> {
        Ok(self.set_address(addr, mode)?)
    }

    fn write(&mut self, bytes: &[u8]) -> CoreResult<()> {
        Ok(self.write_message(bytes)?)
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
    }
}

impl Drop for LinuxI2cDevice {
    fn drop(&mut self) {
        log::debug!("linux_i2c: Closing {}", self.path.display());
    }
}
