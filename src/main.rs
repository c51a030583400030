// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
    spi::{Mode, Phase, Polarity, Spi},
};
use stm32f7xx_hal as hal;

use fpga_tuner::control::Tuner;
use fpga_tuner::drivers::{FpgaLink, Hd44780, Timing};
use fpga_tuner::hw::{BoardPins, InPin, OutPin, SpiBus, SysDelay, Usart};

/// FPGA SPI slave: mode 0, MSB first.
const FPGA_SPI_MODE: Mode = Mode {
    polarity: Polarity::IdleLow,
    phase: Phase::CaptureOnFirstTransition,
};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    #[cfg(feature = "defmt")]
    defmt::info!("fpga_tuner starting");

    // LCD
    let delay = Delay::new(cp.SYST, clocks.sysclk().raw());
    let mut lcd = Hd44780::new(
        pins.lcd.into_lcd_pins(),
        SysDelay::new(delay),
        Timing::DEFAULT,
    );
    lcd.init();

    // SPI1 to the FPGA
    let spi1 = Spi::new(dp.SPI1, (pins.spi1.sck, pins.spi1.miso, pins.spi1.mosi)).enable::<u8>(
        FPGA_SPI_MODE,
        1.MHz(),
        &clocks,
        &mut apb2,
    );
    let link = FpgaLink::new(
        SpiBus::new(spi1),
        InPin::new(pins.fpga.done),
        OutPin::new(pins.fpga.rst),
        OutPin::new(pins.fpga.full_rst),
    );

    let mut tuner = Tuner::new(link, lcd);
    tuner.show_splash();
    usart.println("FPGA FFT tuner: waiting for frames");

    tuner.run(|result| match result {
        Ok(reading) => usart.print_reading(reading),
        Err(_) => usart.println("frame read failed"),
    })
}
