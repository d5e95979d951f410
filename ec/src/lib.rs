#![warn(clippy::pedantic)]

pub mod port_accessor;
pub mod delay;
pub mod gate;
pub mod writer;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use gate::EcGate;
pub use writer::EcWriter;
pub use port_accessor::PortAccessor;
pub use delay::Delay;

/// Status register on read, command register on write.
pub const EC_SC: u16 = 0x66;

/// Data register.
pub const EC_DATA: u16 = 0x62;

/// "Write EC register" command, followed by the register address and the value.
pub const EC_WRITE_CMD: u8 = 0x81;

/// Input buffer full: the controller hasn't consumed the previous byte yet.
pub const EC_STATUS_IBF: u8 = 0x02;
