// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! FPGA FFT core link.
//!
//! The FPGA raises DONE once a 512-point frame is ready and then streams it out over SPI as
//! big-endian 32-bit words, one per bin, real part in the high half. The host only clocks the bus
//! (sending zeros) and pulses RST to start the next capture. There is no handshake beyond that, so
//! a silent FPGA blocks acquisition for as long as the [`Wait`] policy allows.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::dsp::spectrum::{Bin, SpectralFrame, FFT_SIZE};

/// Bytes clocked per bin.
pub const BYTES_PER_BIN: usize = 4;

/// Total bytes in one frame on the wire.
pub const FRAME_BYTES: usize = FFT_SIZE * BYTES_PER_BIN;

/// How long to poll DONE before giving up.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wait {
    /// Spin until the FPGA signals ready.
    Forever,
    /// Sample DONE at most this many times.
    Polls(u32),
}

/// Error type for `FpgaLink` operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// SPI transfer failed mid-frame.
    Spi(E),
    /// DONE stayed low for a bounded [`Wait::Polls`].
    Timeout,
}

/// Something that hands out complete spectral frames.
///
/// The controller only depends on this trait, so the DONE polling can later be swapped for an
/// EXTI interrupt without touching it.
pub trait FrameSource {
    type Error;

    /// Block until a frame is ready, then read all of it.
    fn acquire(&mut self, wait: Wait) -> Result<SpectralFrame, Self::Error>;

    /// Tell the producer to start on the next frame.
    fn request_next(&mut self);
}

/// SPI + handshake lines to the FPGA.
pub struct FpgaLink<SPI, DONE, RST, FRST> {
    spi: SPI,
    done: DONE,
    rst: RST,
    full_rst: FRST,
}

impl<SPI, DONE, RST, FRST> FpgaLink<SPI, DONE, RST, FRST>
where
    SPI: SpiBus<u8>,
    DONE: InputPin,
    RST: OutputPin,
    FRST: OutputPin,
{
    /// Take ownership of the bus and lines. Both reset outputs are driven low.
    pub fn new(spi: SPI, done: DONE, mut rst: RST, mut full_rst: FRST) -> Self {
        rst.set_low().ok();
        full_rst.set_low().ok();
        Self {
            spi,
            done,
            rst,
            full_rst,
        }
    }

    /// Release the bus and pins.
    pub fn free(self) -> (SPI, DONE, RST, FRST) {
        (self.spi, self.done, self.rst, self.full_rst)
    }

    /// Sample DONE once. A read error counts as "not ready".
    #[inline]
    pub fn is_ready(&mut self) -> bool {
        matches!(self.done.is_high(), Ok(true))
    }

    /// Poll DONE according to `wait`.
    pub fn wait_ready(&mut self, wait: Wait) -> Result<(), Error<SPI::Error>> {
        match wait {
            Wait::Forever => {
                while !self.is_ready() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            Wait::Polls(n) => {
                for _ in 0..n {
                    if self.is_ready() {
                        return Ok(());
                    }
                    core::hint::spin_loop();
                }
                Err(Error::Timeout)
            }
        }
    }

    /// Clock one 32-bit word out of the FPGA (MSB first).
    pub fn read_word(&mut self) -> Result<u32, SPI::Error> {
        let mut buf = [0u8; BYTES_PER_BIN];
        self.spi.transfer_in_place(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Read a full frame into `frame`, bins in index order.
    ///
    /// Caller must have seen DONE first.
    pub fn read_frame_into(&mut self, frame: &mut SpectralFrame) -> Result<(), SPI::Error> {
        for bin in frame.bins_mut().iter_mut() {
            *bin = Bin::from_word(self.read_word()?);
        }
        Ok(())
    }

    /// Read a full frame. Caller must have seen DONE first.
    pub fn read_frame(&mut self) -> Result<SpectralFrame, SPI::Error> {
        let mut frame = SpectralFrame::zeroed();
        self.read_frame_into(&mut frame)?;
        Ok(frame)
    }

    /// Toggle RST twice (low → high → low) to start the next capture.
    pub fn pulse_restart(&mut self) {
        self.rst.set_high().ok();
        self.rst.set_low().ok();
    }

    /// Pulse the full-reset line. Not needed in normal operation.
    pub fn full_reset(&mut self) {
        self.full_rst.set_high().ok();
        self.full_rst.set_low().ok();
    }
}

impl<SPI, DONE, RST, FRST> FrameSource for FpgaLink<SPI, DONE, RST, FRST>
where
    SPI: SpiBus<u8>,
    DONE: InputPin,
    RST: OutputPin,
    FRST: OutputPin,
{
    type Error = Error<SPI::Error>;

    fn acquire(&mut self, wait: Wait) -> Result<SpectralFrame, Self::Error> {
        self.wait_ready(wait)?;
        self.read_frame().map_err(Error::Spi)
    }

    fn request_next(&mut self) {
        self.pulse_restart();
    }
}
