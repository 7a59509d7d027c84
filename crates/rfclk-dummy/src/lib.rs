//! rfclk-dummy - Recording in-memory I2C bus for testing
//!
//! This crate provides a dummy bus that records every transaction instead of
//! touching hardware. It's useful for tests, and for dry runs that show what
//! would go out on the wire. Failures can be injected at open, bind and write.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::{rc::Rc, string::String, vec::Vec};
#[cfg(feature = "alloc")]
use core::cell::RefCell;

#[cfg(feature = "alloc")]
use rfclk_core::bus::{BindMode, BusId, DeviceAddress, I2cBus, I2cDevice};
#[cfg(feature = "alloc")]
use rfclk_core::error::{Error, Result};

/// Failure injection for the dummy bus
#[derive(Debug, Clone, Default)]
pub struct DummyConfig {
    /// Fail every open, as if the bus did not exist
    pub fail_open: bool,
    /// Fail every address bind, as if the address were unreachable
    pub fail_bind: bool,
    /// Fail the nth write transaction (0-based, counted across the bus)
    pub fail_write_at: Option<usize>,
}

/// One recorded bus event
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Device node opened
    Open(String),
    /// Target address bound
    Bind {
        /// Address requested
        addr: DeviceAddress,
        /// Bind mode requested
        mode: BindMode,
    },
    /// Write transaction
    Write(Vec<u8>),
    /// Delay in microseconds
    Delay(u32),
    /// Device node closed
    Close(String),
}

#[cfg(feature = "alloc")]
#[derive(Debug, Default)]
struct State {
    log: Vec<Transaction>,
    writes: usize,
    /// Devices currently open, not reset by `clear`
    live: usize,
}

/// Dummy I2C bus
///
/// Clones share one transaction log, so a test can keep a clone while the
/// programmer owns the other.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default)]
pub struct DummyBus {
    config: DummyConfig,
    state: Rc<RefCell<State>>,
}

#[cfg(feature = "alloc")]
impl DummyBus {
    /// Create a new dummy bus with the given failure injection
    pub fn new(config: DummyConfig) -> Self {
        Self {
            config,
            state: Rc::default(),
        }
    }

    /// Get a copy of every transaction recorded so far
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.borrow().log.clone()
    }

    /// Get the payloads of every write recorded so far
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .log
            .iter()
            .filter_map(|t| match t {
                Transaction::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// Count recorded transactions matching `pred`
    pub fn count(&self, pred: impl Fn(&Transaction) -> bool) -> usize {
        self.state.borrow().log.iter().filter(|t| pred(t)).count()
    }

    /// Number of devices opened and not yet closed
    pub fn open_handles(&self) -> usize {
        self.state.borrow().live
    }

    /// Forget everything recorded so far
    ///
    /// Devices that are still open stay counted by `open_handles`.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.log.clear();
        state.writes = 0;
    }

    fn record(&self, transaction: Transaction) {
        log::trace!("dummy: {:?}", transaction);
        self.state.borrow_mut().log.push(transaction);
    }
}

#[cfg(feature = "alloc")]
impl I2cBus for DummyBus {
    type Device = DummyDevice;

    fn open(&mut self, bus: BusId) -> Result<Self::Device> {
        if self.config.fail_open {
            log::debug!("dummy: refusing to open {}", bus);
            return Err(Error::BusOpenFailed);
        }
        let path = String::from(bus.device_path().as_str());
        self.record(Transaction::Open(path.clone()));
        self.state.borrow_mut().live += 1;
        Ok(DummyDevice {
            bus: self.clone(),
            path,
        })
    }
}

/// Device handle opened on a [`DummyBus`]
///
/// Records a [`Transaction::Close`] when dropped.
#[cfg(feature = "alloc")]
#[derive(Debug)]
pub struct DummyDevice {
    bus: DummyBus,
    path: String,
}

#[cfg(feature = "alloc")]
impl I2cDevice for DummyDevice {
    fn bind_address(&mut self, addr: DeviceAddress, mode: BindMode) -> Result<()> {
        self.bus.record(Transaction::Bind { addr, mode });
        if self.bus.config.fail_bind {
            return Err(Error::AddressBindFailed);
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let n = {
            let mut state = self.bus.state.borrow_mut();
            let n = state.writes;
            state.writes += 1;
            n
        };
        if self.bus.config.fail_write_at == Some(n) {
            log::debug!("dummy: failing write #{}", n);
            return Err(Error::WriteFailed);
        }
        self.bus.record(Transaction::Write(bytes.to_vec()));
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.record(Transaction::Delay(us));
    }
}

#[cfg(feature = "alloc")]
impl Drop for DummyDevice {
    fn drop(&mut self) {
        let path = core::mem::take(&mut self.path);
        self.bus.record(Transaction::Close(path));
        let mut state = self.bus.state.borrow_mut();
        state.live = state.live.saturating_sub(1);
    }
}
