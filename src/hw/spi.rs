// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial Peripheral Interface (SPI) abstraction layer.
//!
//! `SpiBus` wraps a configured HAL SPI instance with 8-bit words and implements
//! [`embedded_hal::spi::SpiBus`] on top of it, so drivers never see HAL types. Every word is a
//! blocking, full-duplex single-byte exchange.

use embedded_hal::spi::{self as ehspi, ErrorKind, ErrorType};
use stm32f7xx_hal::{
    prelude::*,
    spi::{self, Enabled, Spi},
};

/// HAL SPI error, reported to drivers as [`ErrorKind::Other`].
#[derive(Debug)]
pub struct SpiError(pub spi::Error);

impl ehspi::Error for SpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl From<spi::Error> for SpiError {
    fn from(e: spi::Error) -> Self {
        SpiError(e)
    }
}

/// Wrapper around an enabled HAL SPI instance (8-bit words).
pub struct SpiBus<I, P> {
    spi: Spi<I, P, Enabled<u8>>,
}

impl<I, P> SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(spi: Spi<I, P, Enabled<u8>>) -> Self {
        Self { spi }
    }

    /// Perform a blocking, full-duplex transfer of one byte.
    pub fn transfer_byte(&mut self, byte: u8) -> Result<u8, spi::Error> {
        let mut tmp = [byte];
        self.spi.transfer(&mut tmp)?;
        Ok(tmp[0])
    }

    pub fn free(self) -> Spi<I, P, Enabled<u8>> {
        self.spi
    }
}

impl<I, P> ErrorType for SpiBus<I, P> {
    type Error = SpiError;
}

impl<I, P> ehspi::SpiBus<u8> for SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    /// Clocks out zeros.
    fn read(&mut self, words: &mut [u8]) -> Result<(), SpiError> {
        for w in words.iter_mut() {
            *w = self.transfer_byte(0x00)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), SpiError> {
        for &w in words {
            self.transfer_byte(w)?;
        }
        Ok(())
    }

    /// Clocks `max(read.len(), write.len())` bytes, padding the write side with zeros.
    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), SpiError> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let out = write.get(i).copied().unwrap_or(0x00);
            let b = self.transfer_byte(out)?;
            if let Some(slot) = read.get_mut(i) {
                *slot = b;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), SpiError> {
        for w in words.iter_mut() {
            *w = self.transfer_byte(*w)?;
        }
        Ok(())
    }

    /// Every transfer above already waits for its RX byte.
    fn flush(&mut self) -> Result<(), SpiError> {
        Ok(())
    }
}
