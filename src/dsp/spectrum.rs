// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Spectral frames received from the FPGA and dominant-bin search.
//!
//! A frame is the raw 512-point FFT output of the FPGA. Only the positive-frequency half is
//! meaningful for a real input signal, so the search skips the DC bin and the mirrored upper half.
//! Magnitudes stay squared and integer; they are only ever compared against each other.

/// Number of bins in one FFT frame.
pub const FFT_SIZE: usize = 512;

/// Bins below this index are candidates for the peak search (DC excluded).
pub const SEARCH_BINS: usize = FFT_SIZE / 2;

/// FPGA sample rate.
pub const SAMPLE_RATE_HZ: f32 = 16_000.0;

/// Width of one bin, 31.25 Hz.
pub const BIN_WIDTH_HZ: f32 = SAMPLE_RATE_HZ / FFT_SIZE as f32;

/// One complex FFT output sample.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bin {
    pub re: i16,
    pub im: i16,
}

impl Bin {
    #[inline]
    pub const fn new(re: i16, im: i16) -> Self {
        Self { re, im }
    }

    /// Decode a bus word: high half is the real part, low half the imaginary part.
    #[inline]
    pub const fn from_word(word: u32) -> Self {
        Self {
            re: (word >> 16) as u16 as i16,
            im: word as u16 as i16,
        }
    }

    /// Squared magnitude `re² + im²`.
    ///
    /// Each square is at most 2^30, so the sum always fits in a `u32`.
    #[inline]
    pub fn magnitude(&self) -> u32 {
        let re = self.re.unsigned_abs() as u32;
        let im = self.im.unsigned_abs() as u32;
        re * re + im * im
    }
}

/// One complete FFT frame, fixed at [`FFT_SIZE`] bins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpectralFrame {
    bins: [Bin; FFT_SIZE],
}

impl SpectralFrame {
    /// A frame with every bin zeroed.
    pub const fn zeroed() -> Self {
        Self {
            bins: [Bin::new(0, 0); FFT_SIZE],
        }
    }

    pub const fn from_bins(bins: [Bin; FFT_SIZE]) -> Self {
        Self { bins }
    }

    #[inline]
    pub fn bins(&self) -> &[Bin; FFT_SIZE] {
        &self.bins
    }

    #[inline]
    pub fn bins_mut(&mut self) -> &mut [Bin; FFT_SIZE] {
        &mut self.bins
    }

    /// Bin at `index`, or `None` past the end of the frame.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Bin> {
        self.bins.get(index)
    }

    /// Overwrite a single bin. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, bin: Bin) {
        if let Some(slot) = self.bins.get_mut(index) {
            *slot = bin;
        }
    }
}

impl Default for SpectralFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Winning bin of a peak search.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DominantBin {
    pub index: u16,
    pub magnitude: u32,
}

impl DominantBin {
    /// Centre frequency of the bin, unrounded.
    #[inline]
    pub fn frequency_hz(&self) -> f32 {
        bin_frequency_hz(self.index)
    }

    /// Frequency rounded half away from zero, as shown on the display.
    #[inline]
    pub fn display_hz(&self) -> u16 {
        display_hz(self.frequency_hz())
    }
}

/// Find the strongest bin in `1..SEARCH_BINS`.
///
/// Comparison is strictly greater-than, so the lowest index wins a tie. A frame with no energy in
/// the search range returns index 0 with magnitude 0, which maps to 0 Hz.
pub fn find_dominant_bin(frame: &SpectralFrame) -> DominantBin {
    let mut best = DominantBin {
        index: 0,
        magnitude: 0,
    };

    for (i, bin) in frame.bins[..SEARCH_BINS].iter().enumerate().skip(1) {
        let mag = bin.magnitude();
        if mag > best.magnitude {
            best = DominantBin {
                index: i as u16,
                magnitude: mag,
            };
        }
    }

    best
}

/// `index × (sample_rate / frame_size)`.
#[inline]
pub fn bin_frequency_hz(index: u16) -> f32 {
    index as f32 * BIN_WIDTH_HZ
}

/// Round a frequency to whole hertz for display. Negative input clamps to 0.
#[inline]
pub fn display_hz(freq_hz: f32) -> u16 {
    libm::roundf(freq_hz) as u16
}
