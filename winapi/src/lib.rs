#![cfg(windows)]
#![warn(clippy::pedantic)]

pub mod auto;
pub mod fs;
pub mod sync;
pub mod token;
