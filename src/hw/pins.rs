// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the tuner on an STM32F767ZI devboard.
//!
//! | Signal | Pin | Notes |
//! | ------ | --- | ----- |
//! | LCD RS, EN, D4..D7 | PA1, PA2, PA3..PA6 | 4-bit HD44780 bus, R/W tied to GND |
//! | SPI1 SCK / MISO / MOSI | PB3 / PB4 / PB5 | AF5, FPGA is the slave |
//! | FPGA DONE | PA8 | input, high when a frame is ready |
//! | FPGA RST | PA9 | output, pulsed to start the next frame |
//! | FPGA FULL_RST | PA10 | output, full FPGA reset |
//! | USART3 TX / RX | PD8 / PD9 | AF7, ST-LINK virtual COM port |

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

use crate::drivers::hd44780::LcdPins;
use crate::hw::OutPin;

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub lcd: LcdBusPins,
    pub spi1: Spi1Pins,
    pub fpga: FpgaPins,
    pub usart3: Usart3Pins,
}

/// HD44780 4-bit bus.
pub struct LcdBusPins {
    pub rs: gpioa::PA1<Output<PushPull>>,
    pub en: gpioa::PA2<Output<PushPull>>,
    pub d4: gpioa::PA3<Output<PushPull>>,
    pub d5: gpioa::PA4<Output<PushPull>>,
    pub d6: gpioa::PA5<Output<PushPull>>,
    pub d7: gpioa::PA6<Output<PushPull>>,
}

/// LCD driver pins for this board.
pub type BoardLcdPins = LcdPins<
    OutPin<'A', 1>,
    OutPin<'A', 2>,
    OutPin<'A', 3>,
    OutPin<'A', 4>,
    OutPin<'A', 5>,
    OutPin<'A', 6>,
>;

impl LcdBusPins {
    /// Wrap the raw pins for [`Hd44780`](crate::drivers::Hd44780).
    pub fn into_lcd_pins(self) -> BoardLcdPins {
        LcdPins {
            rs: OutPin::new(self.rs),
            en: OutPin::new(self.en),
            d4: OutPin::new(self.d4),
            d5: OutPin::new(self.d5),
            d6: OutPin::new(self.d6),
            d7: OutPin::new(self.d7),
        }
    }
}

/// SPI1 SCK/MISO/MOSI to the FPGA.
pub struct Spi1Pins {
    pub sck: gpiob::PB3<Alternate<5>>,
    pub miso: gpiob::PB4<Alternate<5>>,
    pub mosi: gpiob::PB5<Alternate<5>>,
}

/// FPGA handshake lines.
pub struct FpgaPins {
    pub done: gpioa::PA8<Input<Floating>>,
    pub rst: gpioa::PA9<Output<PushPull>>,
    pub full_rst: gpioa::PA10<Output<PushPull>>,
}

pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            lcd: LcdBusPins {
                rs: gpioa.pa1.into_push_pull_output(),
                en: gpioa.pa2.into_push_pull_output(),
                d4: gpioa.pa3.into_push_pull_output(),
                d5: gpioa.pa4.into_push_pull_output(),
                d6: gpioa.pa5.into_push_pull_output(),
                d7: gpioa.pa6.into_push_pull_output(),
            },

            spi1: Spi1Pins {
                sck: gpiob.pb3.into_alternate::<5>(),
                miso: gpiob.pb4.into_alternate::<5>(),
                mosi: gpiob.pb5.into_alternate::<5>(),
            },

            fpga: FpgaPins {
                done: gpioa.pa8.into_floating_input(),
                rst: gpioa.pa9.into_push_pull_output(),
                full_rst: gpioa.pa10.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },
        }
    }
}
