pub mod delay;
pub mod gpio;
pub mod pins;
pub mod spi;
pub mod usart;

pub use delay::SysDelay;
pub use gpio::{InPin, OutPin};
pub use pins::BoardPins;
pub use spi::{SpiBus, SpiError};
pub use usart::Usart;
