// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frequency to equal-tempered note name and cents deviation.
//!
//! Pitch is measured in semitones from A4 = 440 Hz. The nearest whole semitone picks the pitch
//! class, and the residual against that tempered pitch is reported in cents. Cents are not clamped:
//! anything outside ±50 means something upstream went wrong and should stay visible.

use core::f32::consts::LN_2;

/// Reference pitch (A4).
pub const A4_HZ: f32 = 440.0;

/// Name shown when there is no usable frequency.
pub const NO_SIGNAL: &str = "-";

/// Pitch-class names indexed from A, accidentals spelled as flats.
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

/// One of the 12 pitch classes, counted in semitones above A.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PitchClass(u8);

impl PitchClass {
    /// Pitch class of a semitone offset from A4. Negative offsets wrap forward.
    #[inline]
    pub fn from_semitones(offset: i32) -> Self {
        Self(offset.rem_euclid(12) as u8)
    }

    /// Index into [`PITCH_CLASS_NAMES`], `0 = A`.
    #[inline]
    pub fn index(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.0 as usize]
    }
}

/// Result of mapping a frequency onto the tempered scale.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// `None` when the input frequency was not positive.
    pub pitch: Option<PitchClass>,
    /// Signed offset from the nearest tempered pitch.
    pub cents: i32,
}

impl Note {
    /// The "no signal" note: dash, 0 cents.
    pub const SILENT: Note = Note {
        pitch: None,
        cents: 0,
    };

    /// Display name, or [`NO_SIGNAL`] for the silent note.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self.pitch {
            Some(pc) => pc.name(),
            None => NO_SIGNAL,
        }
    }
}

/// Map a frequency to its nearest pitch class and cents deviation.
///
/// `freq_hz <= 0` (silence or a DC-only frame) yields [`Note::SILENT`].
pub fn to_note(freq_hz: f32) -> Note {
    // Also rejects NaN.
    if !(freq_hz > 0.0) {
        return Note::SILENT;
    }

    let semitones = 12.0 * log2(freq_hz / A4_HZ);
    let nearest = libm::roundf(semitones) as i32;

    let tempered = tempered_hz(nearest);
    let cents = libm::roundf(1200.0 * log2(freq_hz / tempered)) as i32;

    Note {
        pitch: Some(PitchClass::from_semitones(nearest)),
        cents,
    }
}

/// Equal-tempered frequency `offset` semitones away from A4.
#[inline]
pub fn tempered_hz(offset: i32) -> f32 {
    A4_HZ * libm::powf(2.0, offset as f32 / 12.0)
}

#[inline]
fn log2(x: f32) -> f32 {
    libm::logf(x) / LN_2
}
