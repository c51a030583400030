// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Signal Processing
//!
//! Integer peak search over FFT frames and mapping of the winning frequency onto note names.
//!
//! ## Modules
//!
//! - [`spectrum`] - Spectral frame layout and dominant-bin search.
//! - [`note`] - Frequency to pitch class and cents deviation.

pub mod note;
pub mod spectrum;

pub use note::{to_note, Note, PitchClass};
pub use spectrum::{find_dominant_bin, Bin, DominantBin, SpectralFrame, FFT_SIZE};
