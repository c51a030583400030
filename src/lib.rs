// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # FPGA Tuner Firmware
//!
//! Firmware for the STM32 side of the FPGA tuner: it pulls 512-point FFT frames from the FPGA
//! over SPI, picks the strongest bin, names the nearest note with its cents offset, and shows the
//! result on a 16×2 character LCD.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level adapters for GPIO, SPI, SysTick delay and the debug USART (`hardware` feature) |
//! | [`drivers`] | Device-level drivers (FPGA FFT link, HD44780 LCD) |
//! | [`dsp`] | Peak search and note mapping |
//! | [`control`] | The tuner loop and screen layout |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features hardware --bin fpga_tuner
//! ```
//!
//! Display-only bring-up:
//!
//! ```bash
//! cargo run --release --features hardware --bin lcd_demo
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod drivers;
pub mod dsp;
#[cfg(feature = "hardware")]
pub mod hw;
