// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! LCD bring-up: loads the flat glyph and draws a static screen. No FPGA needed.

#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{pac, prelude::*};
use stm32f7xx_hal as hal;

use fpga_tuner::drivers::hd44780::{Hd44780, Timing, FLAT_GLYPH};
use fpga_tuner::hw::{BoardPins, SysDelay};

const FLAT_SLOT: u8 = 0;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

    let delay = Delay::new(cp.SYST, clocks.sysclk().raw());
    let mut lcd = Hd44780::new(
        pins.lcd.into_lcd_pins(),
        SysDelay::new(delay),
        Timing::DEFAULT,
    );
    lcd.init();

    lcd.create_char(FLAT_SLOT, &FLAT_GLYPH);

    lcd.set_cursor(0, 1);
    lcd.print("Note: A4");
    lcd.write_char(FLAT_SLOT);

    lcd.set_cursor(4, 0);
    lcd.print("Freq:1000 Hz");

    lcd.set_cursor(10, 1);
    lcd.print("Cents:+0");

    #[cfg(feature = "defmt")]
    defmt::info!("lcd_demo: screen drawn");

    loop {
        cortex_m::asm::nop();
    }
}
