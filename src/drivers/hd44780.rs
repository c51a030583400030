// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HD44780-compatible 16×2 character LCD in 4-bit mode.
//!
//! The display is write-only here (R/W tied low), so there is no busy flag to poll. Every step is
//! followed by a fixed settle delay from [`Timing`] that covers the controller's worst-case
//! execution time.
//!
//! Bytes go out as two nibbles on D4..D7, high nibble first, each latched on the falling edge of
//! EN. RS is held low for commands and high for data across both nibbles.
//!
//! ```ignore
//! let mut lcd = Hd44780::new(pins, delay, Timing::DEFAULT);
//! lcd.init();
//! lcd.set_cursor(0, 1);
//! lcd.print("Note:A");
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Visible columns per row.
pub const COLUMNS: u8 = 16;
/// Visible rows.
pub const ROWS: u8 = 2;
/// DDRAM base address of each row.
pub const ROW_BASE: [u8; 2] = [0x00, 0x40];
/// Number of CGRAM glyph slots.
pub const GLYPH_SLOTS: usize = 8;

// Command set
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;

    pub const ENTRY_MODE: u8 = 0x04;
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const ENTRY_SHIFT: u8 = 0x01;

    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    pub const FUNCTION_SET: u8 = 0x20;
    pub const BUS_8BIT: u8 = 0x10;
    pub const TWO_LINES: u8 = 0x08;
    pub const FONT_5X10: u8 = 0x04;

    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Flat sign (♭), 5×8.
pub const FLAT_GLYPH: [u8; 8] = [
    0b00100, 0b00100, 0b00100, 0b00110, 0b00101, 0b00101, 0b00110, 0b00000,
];

/// Settle times in microseconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Wait after power-on before the first nibble (datasheet: >40 ms after Vcc reaches 2.7 V).
    pub power_on_us: u32,
    /// Wait after the first `0x3` nibble (datasheet: >4.1 ms).
    pub first_sync_us: u32,
    /// Wait after the second and third `0x3` nibbles and after the `0x2` nibble.
    pub sync_us: u32,
    /// EN high time.
    pub enable_pulse_us: u32,
    /// Wait after EN falls, before the next nibble.
    pub nibble_settle_us: u32,
    /// Wait after a complete command or data byte.
    pub byte_settle_us: u32,
    /// Extra wait after clear/home (datasheet: 1.52 ms).
    pub clear_us: u32,
}

impl Timing {
    pub const DEFAULT: Timing = Timing {
        power_on_us: 50_000,
        first_sync_us: 5_000,
        sync_us: 2_000,
        enable_pulse_us: 2,
        nibble_settle_us: 50,
        byte_settle_us: 50,
        clear_us: 2_000,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Driver lifecycle.
///
/// `init` walks through every state in order, but it runs to completion in one call, so callers
/// only ever observe `Uninitialized` (before `init`) and `Operating` (after it).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No init sequence sent yet; bus width unknown.
    Uninitialized,
    /// Controller forced into 8-bit mode by the `0x3` nibbles.
    NibbleSync,
    /// Controller switched to 4-bit bus, function set pending.
    FunctionSet,
    /// Fully configured.
    Operating,
}

/// Register select level for a byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    Command,
    Data,
}

/// The six lines of a 4-bit interface.
pub struct LcdPins<RS, EN, D4, D5, D6, D7> {
    pub rs: RS,
    pub en: EN,
    pub d4: D4,
    pub d5: D5,
    pub d6: D6,
    pub d7: D7,
}

/// Minimal text surface used by the tuner screen.
pub trait TextDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, s: &str);
}

/// HD44780 driver. Owns its pins and delay for the lifetime of the program.
pub struct Hd44780<RS, EN, D4, D5, D6, D7, DELAY> {
    pins: LcdPins<RS, EN, D4, D5, D6, D7>,
    delay: DELAY,
    timing: Timing,
    state: State,

    /// Software copy of the cursor; column follows the hardware auto-increment.
    col: u8,
    row: u8,

    glyphs: [[u8; 8]; GLYPH_SLOTS],
    glyphs_loaded: u8,
}

impl<RS, EN, D4, D5, D6, D7, DELAY> Hd44780<RS, EN, D4, D5, D6, D7, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    DELAY: DelayNs,
{
    /// Wrap the pins. Nothing is sent until [`init`](Self::init).
    pub fn new(pins: LcdPins<RS, EN, D4, D5, D6, D7>, delay: DELAY, timing: Timing) -> Self {
        Self {
            pins,
            delay,
            timing,
            state: State::Uninitialized,
            col: 0,
            row: 0,
            glyphs: [[0; 8]; GLYPH_SLOTS],
            glyphs_loaded: 0,
        }
    }

    pub fn free(self) -> (LcdPins<RS, EN, D4, D5, D6, D7>, DELAY) {
        (self.pins, self.delay)
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Last cursor position as `(col, row)`.
    #[inline]
    pub fn cursor(&self) -> (u8, u8) {
        (self.col, self.row)
    }

    /// Bitmap last written to `slot`, if any.
    pub fn glyph(&self, slot: u8) -> Option<&[u8; 8]> {
        let slot = slot & 0x07;
        if self.glyphs_loaded & (1 << slot) != 0 {
            self.glyphs.get(slot as usize)
        } else {
            None
        }
    }

    /// Run the power-on reset-by-instruction sequence and configure 4-bit, 2 lines, 5×8 font,
    /// display on, cursor and blink off, auto-increment without shift.
    pub fn init(&mut self) {
        let t = self.timing;
        self.state = State::Uninitialized;

        self.pins.rs.set_low().ok();
        self.pins.en.set_low().ok();
        self.delay.delay_us(t.power_on_us);

        // Three 8-bit function sets bring the controller to a known mode from any state.
        self.write_nibble(0x3);
        self.delay.delay_us(t.first_sync_us);
        self.write_nibble(0x3);
        self.delay.delay_us(t.sync_us);
        self.write_nibble(0x3);
        self.delay.delay_us(t.sync_us);
        self.state = State::NibbleSync;

        self.write_nibble(0x2);
        self.delay.delay_us(t.sync_us);
        self.state = State::FunctionSet;

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINES);
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON);
        self.clear();
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT);
        self.state = State::Operating;

        #[cfg(feature = "defmt")]
        defmt::debug!("hd44780: init complete");
    }

    /// Put one nibble on D4..D7 and latch it with an EN pulse.
    fn write_nibble(&mut self, nibble: u8) {
        let t = self.timing;
        set_level(&mut self.pins.d4, nibble & 0x1 != 0);
        set_level(&mut self.pins.d5, nibble & 0x2 != 0);
        set_level(&mut self.pins.d6, nibble & 0x4 != 0);
        set_level(&mut self.pins.d7, nibble & 0x8 != 0);

        self.pins.en.set_high().ok();
        self.delay.delay_us(t.enable_pulse_us);
        self.pins.en.set_low().ok();
        self.delay.delay_us(t.nibble_settle_us);
    }

    /// Send a full byte as two nibbles, high first.
    pub fn send(&mut self, reg: Register, byte: u8) {
        set_level(&mut self.pins.rs, reg == Register::Data);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        self.delay.delay_us(self.timing.byte_settle_us);
    }

    #[inline]
    pub fn command(&mut self, byte: u8) {
        self.send(Register::Command, byte);
    }

    /// Write one data byte at the current address.
    #[inline]
    pub fn write_char(&mut self, byte: u8) {
        self.send(Register::Data, byte);
        self.col = self.col.wrapping_add(1);
    }

    /// Blank DDRAM and return the cursor to (0, 0).
    pub fn clear(&mut self) {
        self.command(cmd::CLEAR);
        self.delay.delay_us(self.timing.clear_us);
        self.col = 0;
        self.row = 0;
    }

    /// Return the cursor to (0, 0) without clearing.
    pub fn home(&mut self) {
        self.command(cmd::HOME);
        self.delay.delay_us(self.timing.clear_us);
        self.col = 0;
        self.row = 0;
    }

    /// Move the cursor. Row 0 starts at DDRAM 0x00, any other row at 0x40.
    ///
    /// `col` is not range-checked; columns past 15 land wherever DDRAM addressing takes them.
    pub fn set_cursor(&mut self, col: u8, row: u8) {
        let base = if row == 0 { ROW_BASE[0] } else { ROW_BASE[1] };
        self.command(cmd::SET_DDRAM_ADDR | base.wrapping_add(col));
        self.col = col;
        self.row = if row == 0 { 0 } else { 1 };
    }

    /// Write bytes up to the first NUL or the end of `s`. No wrapping or truncation.
    pub fn print(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Raw form of [`print`](Self::print); glyph slots 1..7 can be embedded directly.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes.iter().take_while(|&&b| b != 0) {
            self.write_char(b);
        }
    }

    /// Program a custom glyph into CGRAM slot `slot & 7`. Only the low 5 bits of each row are used.
    ///
    /// Leaves the address counter in CGRAM; call [`set_cursor`](Self::set_cursor) before writing
    /// text again. Show the glyph with `write_char(slot)`.
    pub fn create_char(&mut self, slot: u8, rows: &[u8; 8]) {
        let slot = slot & 0x07;
        self.command(cmd::SET_CGRAM_ADDR | (slot << 3));

        let mut stored = [0u8; 8];
        for (dst, &row) in stored.iter_mut().zip(rows.iter()) {
            *dst = row & 0x1F;
            self.send(Register::Data, *dst);
        }

        if let Some(glyph) = self.glyphs.get_mut(slot as usize) {
            *glyph = stored;
        }
        self.glyphs_loaded |= 1 << slot;
    }
}

impl<RS, EN, D4, D5, D6, D7, DELAY> TextDisplay for Hd44780<RS, EN, D4, D5, D6, D7, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    DELAY: DelayNs,
{
    fn clear(&mut self) {
        Hd44780::clear(self);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        Hd44780::set_cursor(self, col, row);
    }

    fn print(&mut self, s: &str) {
        Hd44780::print(self, s);
    }
}

#[inline]
fn set_level<P: OutputPin>(pin: &mut P, high: bool) {
    if high {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    type MockLcd = Hd44780<PinMock, PinMock, PinMock, PinMock, PinMock, PinMock, NoopDelay>;

    fn level(high: bool) -> PinTransaction {
        PinTransaction::set(if high { PinState::High } else { PinState::Low })
    }

    /// Expected traffic on each data line for the given nibbles.
    fn data_line(bit: u8, nibbles: &[u8]) -> PinMock {
        let expected: Vec<_> = nibbles.iter().map(|n| level(n & (1 << bit) != 0)).collect();
        PinMock::new(&expected)
    }

    fn enable_pulses(count: usize) -> PinMock {
        let expected: Vec<_> = (0..count)
            .flat_map(|_| [level(true), level(false)])
            .collect();
        PinMock::new(&expected)
    }

    fn lcd(rs: &[bool], nibbles: &[u8]) -> MockLcd {
        let rs: Vec<_> = rs.iter().map(|&h| level(h)).collect();
        let pins = LcdPins {
            rs: PinMock::new(&rs),
            en: enable_pulses(nibbles.len()),
            d4: data_line(0, nibbles),
            d5: data_line(1, nibbles),
            d6: data_line(2, nibbles),
            d7: data_line(3, nibbles),
        };
        Hd44780::new(pins, NoopDelay, Timing::DEFAULT)
    }

    fn finish(lcd: MockLcd) {
        let (mut pins, _) = lcd.free();
        pins.rs.done();
        pins.en.done();
        pins.d4.done();
        pins.d5.done();
        pins.d6.done();
        pins.d7.done();
    }

    #[test]
    fn command_goes_out_high_nibble_first_with_rs_low() {
        let mut lcd = lcd(&[false], &[0x2, 0x8]);
        lcd.command(0x28);
        finish(lcd);
    }

    #[test]
    fn data_byte_holds_rs_high() {
        let mut lcd = lcd(&[true], &[0x4, 0x1]);
        lcd.write_char(b'A');
        assert_eq!(lcd.cursor(), (1, 0));
        finish(lcd);
    }

    #[test]
    fn cursor_row_one_adds_0x40() {
        let mut lcd = lcd(&[false], &[0xC, 0x5]);
        lcd.set_cursor(5, 1);
        assert_eq!(lcd.cursor(), (5, 1));
        finish(lcd);
    }

    #[test]
    fn print_stops_at_nul() {
        let mut lcd = lcd(&[true, true], &[0x4, 0x8, 0x6, 0x9]);
        lcd.print("Hi\0there");
        finish(lcd);
    }

    #[test]
    fn new_driver_is_uninitialized() {
        let lcd = lcd(&[], &[]);
        assert_eq!(lcd.state(), State::Uninitialized);
        assert_eq!(lcd.glyph(0), None);
        finish(lcd);
    }

    #[test]
    fn default_timing_respects_datasheet_minimums() {
        let t = Timing::default();
        assert!(t.power_on_us >= 40_000);
        assert!(t.first_sync_us >= 4_100);
        assert!(t.sync_us >= 100);
        assert!(t.clear_us >= 1_520);
        assert!(t.enable_pulse_us >= 1);
        assert!(t.byte_settle_us >= 37);
    }
}
