//! Bus interface abstraction for the MAX17048 driver.

pub mod i2c;

/// Abstraction over the low-level bus access required by the driver.
///
/// All MAX17048 registers are 16 bits wide and travel most-significant-byte
/// first, so the trait works in whole registers rather than byte buffers.
pub trait Max17048Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a 16-bit register.
    fn write_register(&mut self, register: u8, value: u16)
        -> core::result::Result<(), Self::Error>;

    /// Reads a 16-bit register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error>;
}
