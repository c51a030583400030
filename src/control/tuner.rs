// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tuner main loop: wait for a frame, find the peak, name it, draw it, ask for the next one.
//!
//! Screen layout on the 16×2 LCD:
//!
//! ```text
//! Freq:250Hz
//! Note:B  +21
//! ```
//!
//! The cents field always starts at column [`CENTS_COL`] and always carries a sign.

use crate::drivers::fpga::{FrameSource, Wait};
use crate::drivers::hd44780::TextDisplay;
use crate::dsp::note::{to_note, Note};
use crate::dsp::spectrum::{display_hz, find_dominant_bin, DominantBin, SpectralFrame};

/// Column where the signed cents value is drawn on row 1.
pub const CENTS_COL: u8 = 8;

pub const SPLASH_TITLE: &str = "FPGA FFT Tuner";
pub const SPLASH_STATUS: &str = "Waiting...";

/// Everything derived from one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub peak: DominantBin,
    /// Bin centre frequency, unrounded. This is what the note mapping sees.
    pub freq_hz: f32,
    /// `freq_hz` rounded for the display.
    pub display_hz: u16,
    pub note: Note,
}

impl Reading {
    pub fn from_frame(frame: &SpectralFrame) -> Self {
        let peak = find_dominant_bin(frame);
        let freq_hz = peak.frequency_hz();
        Self {
            peak,
            freq_hz,
            display_hz: display_hz(freq_hz),
            note: to_note(freq_hz),
        }
    }
}

/// Draw the start-up screen shown until the first frame arrives.
pub fn show_splash<D: TextDisplay>(display: &mut D) {
    display.clear();
    display.set_cursor(0, 0);
    display.print(SPLASH_TITLE);
    display.set_cursor(0, 1);
    display.print(SPLASH_STATUS);
}

/// Redraw both rows for `reading`.
pub fn render<D: TextDisplay>(display: &mut D, reading: &Reading) {
    let mut num = itoa::Buffer::new();

    display.clear();

    display.set_cursor(0, 0);
    display.print("Freq:");
    display.print(num.format(reading.display_hz));
    display.print("Hz");

    display.set_cursor(0, 1);
    display.print("Note:");
    display.print(reading.note.name());

    display.set_cursor(CENTS_COL, 1);
    if reading.note.cents >= 0 {
        display.print("+");
    }
    display.print(num.format(reading.note.cents));
}

/// Owns the frame source and the display for the lifetime of the firmware.
pub struct Tuner<S, D> {
    source: S,
    display: D,
    wait: Wait,
}

impl<S, D> Tuner<S, D>
where
    S: FrameSource,
    D: TextDisplay,
{
    /// Blocks forever on the FPGA by default.
    pub fn new(source: S, display: D) -> Self {
        Self {
            source,
            display,
            wait: Wait::Forever,
        }
    }

    /// Bound the time spent waiting for each frame.
    pub fn with_wait(mut self, wait: Wait) -> Self {
        self.wait = wait;
        self
    }

    pub fn free(self) -> (S, D) {
        (self.source, self.display)
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn show_splash(&mut self) {
        show_splash(&mut self.display);
    }

    /// One full cycle. The next frame is requested even when acquisition failed, so a glitch on
    /// the bus costs one frame instead of stalling the FPGA.
    pub fn step(&mut self) -> Result<Reading, S::Error> {
        let result = self.source.acquire(self.wait).map(|frame| {
            let reading = Reading::from_frame(&frame);
            render(&mut self.display, &reading);
            reading
        });

        #[cfg(feature = "defmt")]
        match &result {
            Ok(r) => defmt::debug!(
                "bin {=u16}: {=u16} Hz {=str} {=i32}c",
                r.peak.index,
                r.display_hz,
                r.note.name(),
                r.note.cents
            ),
            Err(_) => defmt::warn!("frame acquisition failed"),
        }

        self.source.request_next();
        result
    }

    /// Run forever, handing each cycle's outcome to `report`.
    pub fn run<F>(&mut self, mut report: F) -> !
    where
        F: FnMut(&Result<Reading, S::Error>),
    {
        loop {
            let result = self.step();
            report(&result);
        }
    }
}
