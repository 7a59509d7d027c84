//! SC18IS602 I2C-to-SPI bridge routines
//!
//! On the board the clock chips hang off an NXP SC18IS602 at I2C address
//! 0x2F. An I2C write of `[function_id, data...]` makes the bridge assert the
//! slave selects named by the function id bitmask and shift `data` out over
//! SPI, MSB first.
//!
//! Slave select wiring:
//!
//! | Select | Chip |
//! |--------|------|
//! | SS0    | LMX2594 (ADC) |
//! | SS1    | LMK04208 |
//! | SS2    | LMX2594 (DAC) |
//! | SS3    | LMX2594 (RF) |
//!
//! The three synthesizers are always programmed together with one image.

use bitflags::bitflags;
use log::{debug, trace};

use crate::bus::{BindMode, BusId, DeviceAddress, I2cBus, I2cDevice};
use crate::error::Result;
use crate::regs::{Lmk04208Regs, Lmx2594Regs};
use crate::vendor::{JitterCleanerConfig, SynthesizerUpdate};

bitflags! {
    /// SC18IS602 function id for an SPI write: one bit per slave select
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SlaveSelect: u8 {
        /// SS0
        const SS0 = 1 << 0;
        /// SS1
        const SS1 = 1 << 1;
        /// SS2
        const SS2 = 1 << 2;
        /// SS3
        const SS3 = 1 << 3;

        /// LMK04208 jitter cleaner
        const LMK04208 = Self::SS1.bits();
        /// All three LMX2594 synthesizers
        const LMX2594 = Self::SS0.bits() | Self::SS2.bits() | Self::SS3.bits();
    }
}

/// Delay after each register word, in microseconds
pub const WORD_DELAY_US: u32 = 1_000;

/// LMX2594 settle time before the final R0 write, in microseconds
pub const LMX2594_CAL_DELAY_US: u32 = 10_000;

/// LMX2594 R0 with RESET = 1
const LMX2594_RESET: u32 = 0x00_0002;

/// LMX2594 R0 with RESET = 0
const LMX2594_RESET_CLEAR: u32 = 0x00_0000;

/// SPI frame width of a register word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordWidth {
    /// 24-bit frame (low three bytes of the word)
    Bits24,
    /// 32-bit frame
    Bits32,
}

impl WordWidth {
    /// Number of bytes shifted out per word
    pub const fn bytes(self) -> usize {
        match self {
            Self::Bits24 => 3,
            Self::Bits32 => 4,
        }
    }
}

/// Encode one bridge write frame into `buf`, returning the used prefix
///
/// The frame is the function id followed by the word, most significant
/// byte first.
pub fn encode_frame(
    select: SlaveSelect,
    word: u32,
    width: WordWidth,
    buf: &mut [u8; 5],
) -> &[u8] {
    let bytes = word.to_be_bytes();
    let n = width.bytes();
    buf[0] = select.bits();
    buf[1..=n].copy_from_slice(&bytes[4 - n..]);
    &buf[..=n]
}

/// Write one register word through the bridge
pub fn write_word<D: I2cDevice + ?Sized>(
    device: &mut D,
    select: SlaveSelect,
    word: u32,
    width: WordWidth,
) -> Result<()> {
    let mut buf = [0u8; 5];
    let frame = encode_frame(select, word, width, &mut buf);
    trace!("sc18is602: {:?} <- {:02X?}", select, &frame[1..]);
    device.write(frame)
}

/// LMK04208 configuration routine through the bridge
///
/// Opens its own handle on the requested bus for every call and releases it
/// before returning.
#[derive(Debug)]
pub struct BridgeJitterCleaner<B> {
    bus: B,
}

impl<B: I2cBus> BridgeJitterCleaner<B> {
    /// Create a routine that opens devices through `bus`
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Get the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Consume the routine and return the bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> JitterCleanerConfig for BridgeJitterCleaner<B> {
    fn configure(&mut self, bus: BusId, instances: &[Lmk04208Regs; 1]) -> Result<()> {
        let mut device = self.bus.open(bus)?;
        device.bind_address(DeviceAddress::SC18IS602, BindMode::Force)?;

        debug!("lmk04208: writing {} registers on {}", Lmk04208Regs::LEN, bus);
        for &word in &instances[0] {
            write_word(&mut device, SlaveSelect::LMK04208, word, WordWidth::Bits32)?;
            device.delay_us(WORD_DELAY_US);
        }
        Ok(())
    }
}

/// LMX2594 update routine through the bridge
///
/// Follows the power-up sequence from the datasheet: reset, release reset,
/// write the image, wait, then write R0 again so the VCO calibration runs
/// from a stable state.
#[derive(Debug, Default, Clone, Copy)]
pub struct BridgeSynthesizer;

impl BridgeSynthesizer {
    /// Create the routine
    pub const fn new() -> Self {
        Self
    }
}

impl<D: I2cDevice> SynthesizerUpdate<D> for BridgeSynthesizer {
    fn update(&mut self, device: &mut D, regs: &Lmx2594Regs) -> Result<()> {
        let select = SlaveSelect::LMX2594;
        let width = WordWidth::Bits24;

        write_word(device, select, LMX2594_RESET, width)?;
        write_word(device, select, LMX2594_RESET_CLEAR, width)?;

        debug!("lmx2594: writing {} registers", Lmx2594Regs::LEN);
        for &word in regs {
            write_word(device, select, word, width)?;
            device.delay_us(WORD_DELAY_US);
        }

        device.delay_us(LMX2594_CAL_DELAY_US);
        write_word(device, select, regs.r0(), width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_slave_select_bits() {
        assert_eq!(SlaveSelect::LMK04208.bits(), 0x02);
        assert_eq!(SlaveSelect::LMX2594.bits(), 0x0D);
        assert!(!SlaveSelect::LMX2594.intersects(SlaveSelect::LMK04208));
    }

    #[test]
    fn test_encode_frame_24() {
        let mut buf = [0u8; 5];
        let frame = encode_frame(
            SlaveSelect::LMX2594,
            0xAA70_1234,
            WordWidth::Bits24,
            &mut buf,
        );
        // Top byte is dropped
        assert_eq!(frame, &[0x0D, 0x70, 0x12, 0x34]);
    }

    #[test]
    fn test_encode_frame_32() {
        let mut buf = [0u8; 5];
        let frame = encode_frame(
            SlaveSelect::LMK04208,
            0x8014_0320,
            WordWidth::Bits32,
            &mut buf,
        );
        assert_eq!(frame, &[0x02, 0x80, 0x14, 0x03, 0x20]);
    }

    /// Device that counts frames and fails the nth write
    struct CountingDevice {
        writes: usize,
        fail_at: Option<usize>,
        last: [u8; 5],
        delays: u32,
    }

    impl CountingDevice {
        fn new(fail_at: Option<usize>) -> Self {
            Self {
                writes: 0,
                fail_at,
                last: [0; 5],
                delays: 0,
            }
        }
    }

    impl I2cDevice for CountingDevice {
        fn bind_address(&mut self, _addr: DeviceAddress, _mode: BindMode) -> Result<()> {
            Ok(())
        }

        fn write(&mut self, bytes: &[u8]) -> Result<()> {
            if self.fail_at == Some(self.writes) {
                return Err(Error::WriteFailed);
            }
            self.writes += 1;
            self.last = [0; 5];
            self.last[..bytes.len()].copy_from_slice(bytes);
            Ok(())
        }

        fn delay_us(&mut self, us: u32) {
            self.delays += us;
        }
    }

    #[test]
    fn test_synthesizer_sequence_counts() {
        let mut regs = [0u32; 113];
        regs[112] = 0x00_241C;
        let mut device = CountingDevice::new(None);

        BridgeSynthesizer::new()
            .update(&mut device, &Lmx2594Regs::new(regs))
            .unwrap();

        // reset + clear + image + final R0
        assert_eq!(device.writes, 2 + 113 + 1);
        assert_eq!(device.last[..4], [0x0D, 0x00, 0x24, 0x1C]);
        assert_eq!(device.delays, 113 * WORD_DELAY_US + LMX2594_CAL_DELAY_US);
    }

    #[test]
    fn test_synthesizer_stops_on_write_failure() {
        let mut device = CountingDevice::new(Some(10));

        let result = BridgeSynthesizer::new().update(&mut device, &Lmx2594Regs::new([0; 113]));

        assert_eq!(result, Err(Error::WriteFailed));
        assert_eq!(device.writes, 10);
    }
}
