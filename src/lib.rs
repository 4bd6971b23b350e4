#![no_std]

#[cfg(test)]
extern crate std;

mod error;

pub mod device;
pub mod interface;
pub mod registers;

pub use crate::device::Max17048;
pub use crate::error::{Error, Result};
