//! Behavioural model of an HD44780 controller wired to fake GPIO lines.
//!
//! Each `FakePin` drives one line of a shared bus. A falling edge on EN latches D4..D7 exactly like
//! the real controller: single nibbles while it is still in 8-bit mode after reset, nibble pairs
//! once a 4-bit function set has been seen. `FakeDelay` logs every wait into the same timeline, so
//! tests can check which settle time followed which nibble.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use fpga_tuner::drivers::hd44780::{LcdPins, COLUMNS, ROWS, ROW_BASE};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Line {
    Rs,
    En,
    D4,
    D5,
    D6,
    D7,
}

impl Line {
    fn index(self) -> usize {
        self as usize
    }
}

/// Bus timeline entry, in the order the driver produced it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// D4..D7 latched on a falling EN edge.
    Latch(u8),
    /// A busy wait, with the EN level while it ran.
    Delay { us: u32, en_high: bool },
}

/// A fully decoded byte as the controller saw it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Write {
    Command(u8),
    Data(u8),
}

struct Model {
    levels: [bool; 6],
    four_bit: bool,
    pending: Option<(bool, u8)>,
    rs_glitches: usize,

    init_nibbles: Vec<u8>,
    writes: Vec<Write>,
    events: Vec<Event>,

    ddram: [u8; 128],
    cgram: [u8; 64],
    addr: u8,
    in_cgram: bool,

    function_set: u8,
    display_control: u8,
    entry_mode: u8,
}

impl Model {
    fn new() -> Self {
        Self {
            levels: [false; 6],
            four_bit: false,
            pending: None,
            rs_glitches: 0,
            init_nibbles: Vec::new(),
            writes: Vec::new(),
            events: Vec::new(),
            ddram: [b' '; 128],
            cgram: [0; 64],
            addr: 0,
            in_cgram: false,
            function_set: 0,
            display_control: 0,
            entry_mode: 0,
        }
    }

    fn set(&mut self, line: Line, high: bool) {
        let was_high = self.levels[line.index()];
        self.levels[line.index()] = high;
        if line == Line::En && was_high && !high {
            self.latch();
        }
    }

    fn latch(&mut self) {
        let l = &self.levels;
        let nibble = (l[Line::D4.index()] as u8)
            | (l[Line::D5.index()] as u8) << 1
            | (l[Line::D6.index()] as u8) << 2
            | (l[Line::D7.index()] as u8) << 3;
        let rs = l[Line::Rs.index()];
        self.events.push(Event::Latch(nibble));

        if !self.four_bit {
            // 8-bit mode: the nibble is the upper half of a command, the lower half floats.
            self.init_nibbles.push(nibble);
            let cmd = nibble << 4;
            if cmd & 0xF0 == 0x20 {
                self.four_bit = true;
            }
            return;
        }

        match self.pending.take() {
            None => self.pending = Some((rs, nibble)),
            Some((first_rs, high)) => {
                if first_rs != rs {
                    self.rs_glitches += 1;
                }
                self.execute(rs, (high << 4) | nibble);
            }
        }
    }

    fn wait(&mut self, us: u32) {
        let en_high = self.levels[Line::En.index()];
        self.events.push(Event::Delay { us, en_high });
    }

    fn execute(&mut self, rs: bool, byte: u8) {
        if rs {
            self.writes.push(Write::Data(byte));
            if self.in_cgram {
                self.cgram[(self.addr & 0x3F) as usize] = byte;
                self.addr = (self.addr + 1) & 0x3F;
            } else {
                self.ddram[(self.addr & 0x7F) as usize] = byte;
                self.addr = (self.addr + 1) & 0x7F;
            }
            return;
        }

        self.writes.push(Write::Command(byte));
        if byte & 0x80 != 0 {
            self.addr = byte & 0x7F;
            self.in_cgram = false;
        } else if byte & 0x40 != 0 {
            self.addr = byte & 0x3F;
            self.in_cgram = true;
        } else if byte & 0x20 != 0 {
            self.function_set = byte;
        } else if byte & 0x10 != 0 {
            // cursor/display shift, unused
        } else if byte & 0x08 != 0 {
            self.display_control = byte;
        } else if byte & 0x04 != 0 {
            self.entry_mode = byte;
        } else if byte & 0x02 != 0 {
            self.addr = 0;
            self.in_cgram = false;
        } else if byte & 0x01 != 0 {
            self.ddram = [b' '; 128];
            self.addr = 0;
            self.in_cgram = false;
        }
    }
}

/// One LCD line backed by the shared model.
pub struct FakePin {
    model: Rc<RefCell<Model>>,
    line: Line,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.model.borrow_mut().set(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.model.borrow_mut().set(self.line, true);
        Ok(())
    }
}

/// Delay that records each wait in microseconds instead of sleeping.
pub struct FakeDelay {
    model: Rc<RefCell<Model>>,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.model.borrow_mut().wait(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.model.borrow_mut().wait(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.model.borrow_mut().wait(ms * 1_000);
    }
}

pub type FakeLcdPins = LcdPins<FakePin, FakePin, FakePin, FakePin, FakePin, FakePin>;

/// Read-only view of the model for assertions.
#[derive(Clone)]
pub struct Probe {
    model: Rc<RefCell<Model>>,
}

impl Probe {
    pub fn writes(&self) -> Vec<Write> {
        self.model.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.model.borrow_mut().writes.clear();
    }

    pub fn events(&self) -> Vec<Event> {
        self.model.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.model.borrow_mut().events.clear();
    }

    pub fn init_nibbles(&self) -> Vec<u8> {
        self.model.borrow().init_nibbles.clone()
    }

    pub fn four_bit(&self) -> bool {
        self.model.borrow().four_bit
    }

    /// Nibble pairs whose RS level changed between the two halves.
    pub fn rs_glitches(&self) -> usize {
        self.model.borrow().rs_glitches
    }

    /// True when an odd nibble is waiting for its partner.
    pub fn half_byte_pending(&self) -> bool {
        self.model.borrow().pending.is_some()
    }

    pub fn function_set(&self) -> u8 {
        self.model.borrow().function_set
    }

    pub fn display_control(&self) -> u8 {
        self.model.borrow().display_control
    }

    pub fn entry_mode(&self) -> u8 {
        self.model.borrow().entry_mode
    }

    pub fn ddram(&self, addr: u8) -> u8 {
        self.model.borrow().ddram[(addr & 0x7F) as usize]
    }

    pub fn cgram_slot(&self, slot: u8) -> [u8; 8] {
        let start = (slot as usize & 0x07) * 8;
        let mut out = [0; 8];
        out.copy_from_slice(&self.model.borrow().cgram[start..start + 8]);
        out
    }

    /// The visible characters of `row`, trailing spaces trimmed.
    pub fn row(&self, row: usize) -> String {
        assert!(row < ROWS as usize, "row {} is off the display", row);
        let base = ROW_BASE[row] as usize;
        let m = self.model.borrow();
        m.ddram[base..base + COLUMNS as usize]
            .iter()
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

pub fn fake_lcd() -> (FakeLcdPins, Probe) {
    let (pins, _, probe) = fake_lcd_with_delay();
    (pins, probe)
}

/// Like [`fake_lcd`], plus a delay that logs into the bus timeline.
pub fn fake_lcd_with_delay() -> (FakeLcdPins, FakeDelay, Probe) {
    let model = Rc::new(RefCell::new(Model::new()));
    let pin = |line| FakePin {
        model: model.clone(),
        line,
    };
    let pins = LcdPins {
        rs: pin(Line::Rs),
        en: pin(Line::En),
        d4: pin(Line::D4),
        d5: pin(Line::D5),
        d6: pin(Line::D6),
        d7: pin(Line::D7),
    };
    let delay = FakeDelay {
        model: model.clone(),
    };
    (pins, delay, Probe { model })
}
