// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic. Drivers only depend on `embedded-hal` traits, so they also run against mocks
//! on the host.
//!
//! ## Existing drivers
//!
//! - [`fpga`] – SPI link to the FPGA FFT core (DONE / RST handshake)
//! - [`hd44780`] – HD44780 16×2 character LCD over a 4-bit parallel bus

pub mod fpga;
pub mod hd44780;

pub use fpga::{FpgaLink, FrameSource, Wait};
pub use hd44780::{Hd44780, LcdPins, TextDisplay, Timing};
