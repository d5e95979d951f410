#![cfg(windows)]
#![warn(clippy::pedantic)]

pub mod interface;
pub mod loader;
pub mod error;

use winapi::auto;

pub use interface::Interface;

/// Port I/O through the user-mode InpOut library and its kernel driver.
pub struct Inpout {
    out32: interface::Out32,
    inp32: interface::Inp32,

    // Must outlive the resolved functions above:
    _module: auto::Module
}
