//! I²C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Max17048Interface;

/// Default 7-bit bus address of the MAX17048.
///
/// The datasheet quotes the 8-bit write address 0x6C; `embedded-hal` uses
/// 7-bit addressing, so the driver stores 0x6C >> 1.
pub const DEFAULT_ADDRESS: u8 = 0x36;

/// I²C-based interface implementation for the MAX17048 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface using the default bus address.
    pub const fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a new interface bound to an explicit 7-bit bus address.
    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit bus address this interface talks to.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I²C device.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I²C device.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Max17048Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(
        &mut self,
        register: u8,
        value: u16,
    ) -> core::result::Result<(), Self::Error> {
        let [high, low] = value.to_be_bytes();
        self.i2c.write(self.address, &[register, high, low])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error> {
        let mut raw = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut raw)?;
        Ok(u16::from_be_bytes(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::{I2cInterface, DEFAULT_ADDRESS};
    use crate::interface::Max17048Interface;
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
    use std::vec;

    #[test]
    fn write_register_sends_offset_then_big_endian_value() {
        let expectations = [Transaction::write(
            DEFAULT_ADDRESS,
            vec![0x0C, 0x97, 0x1C],
        )];
        let mock = Mock::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        interface.write_register(0x0C, 0x971C).unwrap();
        interface.release().done();
    }

    #[test]
    fn read_register_selects_offset_and_composes_big_endian() {
        let expectations = [Transaction::write_read(
            DEFAULT_ADDRESS,
            vec![0x08],
            vec![0xAB, 0xCD],
        )];
        let mock = Mock::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        let value = interface.read_register(0x08).unwrap();
        assert_eq!(value, 0xABCD);
        interface.release().done();
    }

    #[test]
    fn custom_address_is_used_on_the_bus() {
        let expectations = [Transaction::write(0x37, vec![0xFE, 0x54, 0x00])];
        let mock = Mock::new(&expectations);
        let mut interface = I2cInterface::with_address(mock, 0x37);

        interface.write_register(0xFE, 0x5400).unwrap();
        interface.release().done();
    }
}
