//! Clock chip programmers
//!
//! Two programmers, one per chip family, both invoked with a bus number and
//! a complete register image:
//!
//! - [`Lmk04208Programmer`] hands the image to a [`JitterCleanerConfig`]
//!   routine that manages its own bus handle.
//! - [`Lmx2594Programmer`] opens the bus itself, force-binds the bridge
//!   address, runs a [`SynthesizerUpdate`] routine on the bound handle and
//!   releases the handle.
//!
//! Neither keeps state between calls. Callers must serialize calls that
//! target the same bus.

use log::{debug, error, info};

use crate::bus::{BindMode, BusId, DeviceAddress, I2cBus, I2cDevice};
use crate::error::Result;
use crate::regs::{Lmk04208Regs, Lmx2594Regs};
use crate::vendor::{JitterCleanerConfig, SynthesizerUpdate};

/// Programmer for the LMK04208 jitter cleaner
#[derive(Debug)]
pub struct Lmk04208Programmer<C> {
    config: C,
}

impl<C: JitterCleanerConfig> Lmk04208Programmer<C> {
    /// Create a programmer that delegates to `config`
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Get the configuration routine
    pub fn routine(&self) -> &C {
        &self.config
    }

    /// Consume the programmer and return the configuration routine
    pub fn into_inner(self) -> C {
        self.config
    }

    /// Push a complete image to the jitter cleaner on `bus`
    ///
    /// Returns whatever the configuration routine reports.
    pub fn program(&mut self, bus: BusId, regs: &Lmk04208Regs) -> Result<()> {
        let instances = [*regs];
        debug!("lmk04208: configuring on {}", bus);
        self.config.configure(bus, &instances)?;
        info!("lmk04208: programmed {} registers on {}", Lmk04208Regs::LEN, bus);
        Ok(())
    }
}

/// Programmer for the LMX2594 wideband synthesizers
#[derive(Debug)]
pub struct Lmx2594Programmer<B, U> {
    bus: B,
    update: U,
}

impl<B, U> Lmx2594Programmer<B, U>
where
    B: I2cBus,
    U: SynthesizerUpdate<B::Device>,
{
    /// Create a programmer that opens devices through `bus` and writes
    /// registers with `update`
    pub fn new(bus: B, update: U) -> Self {
        Self { bus, update }
    }

    /// Get the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Consume the programmer and return the bus and update routine
    pub fn into_inner(self) -> (B, U) {
        (self.bus, self.update)
    }

    /// Push a complete image to the synthesizers on `bus`
    ///
    /// The device handle opened here is owned by this call and is dropped,
    /// closing it, on every return path.
    pub fn program(&mut self, bus: BusId, regs: &Lmx2594Regs) -> Result<()> {
        debug!("lmx2594: opening {}", bus);
        let mut device = self.bus.open(bus)?;

        let addr = DeviceAddress::SC18IS602;
        if let Err(e) = device.bind_address(addr, BindMode::Force) {
            error!("lmx2594: could not set address {} on {}: {}", addr, bus, e);
            return Err(e);
        }

        debug!("lmx2594: bound {} on {}", addr, bus);
        let result = self.update.update(&mut device, regs);
        drop(device);
        debug!("lmx2594: closed {}", bus);

        result?;
        info!("lmx2594: programmed {} registers on {}", Lmx2594Regs::LEN, bus);
        Ok(())
    }
}

/// Program an LMX2594 image through a bus, binding and releasing a device
///
/// Shorthand for a one-off [`Lmx2594Programmer`] call.
pub fn program_lmx2594<B, U>(bus: B, update: U, bus_id: BusId, regs: &Lmx2594Regs) -> Result<()>
where
    B: I2cBus,
    U: SynthesizerUpdate<B::Device>,
{
    Lmx2594Programmer::new(bus, update).program(bus_id, regs)
}

/// Program an LMK04208 image with a configuration routine
///
/// Shorthand for a one-off [`Lmk04208Programmer`] call.
pub fn program_lmk04208<C>(config: C, bus_id: BusId, regs: &Lmk04208Regs) -> Result<()>
where
    C: JitterCleanerConfig,
{
    Lmk04208Programmer::new(config).program(bus_id, regs)
}
