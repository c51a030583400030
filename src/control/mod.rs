// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control
//!
//! Application-level orchestration on top of the drivers.
//!
//! ## Modules
//!
//! - [`tuner`] - Acquire → analyze → map → render loop and the LCD screen layout.

pub mod tuner;

pub use tuner::{render, show_splash, Reading, Tuner};
