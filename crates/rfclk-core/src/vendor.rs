//! Vendor routine boundary
//!
//! The chip-specific write sequences live behind these two traits. The
//! programmers only decide how a bus session is set up around them; the
//! routines decide which frames go on the wire. [`crate::bridge`] provides
//! the routines for the SC18IS602-attached clock chips, and tests or
//! orchestrators can plug in their own (closures implement both traits).
//!
//! Both routines report their real outcome, and the programmers hand that
//! outcome to the caller unchanged.

use crate::bus::{BusId, I2cDevice};
use crate::error::Result;
use crate::regs::{Lmk04208Regs, Lmx2594Regs};

/// Full configuration routine for the LMK04208 jitter cleaner
///
/// The routine owns its bus handle: it opens, addresses and releases the
/// device itself. The image is passed in the one-chip-instance shape the
/// board configuration uses.
pub trait JitterCleanerConfig {
    /// Write the image of `instances[0]` to the jitter cleaner on `bus`
    fn configure(&mut self, bus: BusId, instances: &[Lmk04208Regs; 1]) -> Result<()>;
}

/// Register update routine for the LMX2594 synthesizer
///
/// The device handed in is already open and bound to the bridge address.
/// The routine must not keep it beyond the call.
pub trait SynthesizerUpdate<D: I2cDevice> {
    /// Write every word of `regs` to the synthesizer through `device`
    fn update(&mut self, device: &mut D, regs: &Lmx2594Regs) -> Result<()>;
}

impl<F> JitterCleanerConfig for F
where
    F: FnMut(BusId, &[Lmk04208Regs; 1]) -> Result<()>,
{
    fn configure(&mut self, bus: BusId, instances: &[Lmk04208Regs; 1]) -> Result<()> {
        self(bus, instances)
    }
}

impl<D, F> SynthesizerUpdate<D> for F
where
    D: I2cDevice,
    F: FnMut(&mut D, &Lmx2594Regs) -> Result<()>,
{
    fn update(&mut self, device: &mut D, regs: &Lmx2594Regs) -> Result<()> {
        self(device, regs)
    }
}
