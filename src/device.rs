//! High-level MAX17048 device driver implementation.

use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::Max17048Interface;
use crate::registers::{
    Config,
    Mode,
    REG_CMD,
    REG_CONFIG,
    REG_MODE,
    REG_SOC,
    REG_VCELL,
    REG_VERSION,
    RESET_COMMAND,
    VCELL_RESOLUTION_NV,
};
use embedded_hal::i2c::I2c;

/// High-level synchronous driver for the MAX17048 fuel gauge.
///
/// The driver keeps no cached register state; every call re-queries the
/// device. Read-modify-write operations are not internally synchronized, so
/// callers sharing one gauge across execution contexts must serialize access.
pub struct Max17048<IFACE> {
    interface: IFACE,
}

/// Decoded view of the `MODE` register with explicit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSnapshot {
    /// MODE[12] HI_STAT, set while the IC is hibernating.
    pub hibernating: bool,
    /// MODE[13] EN_SLEEP, sleep permission.
    pub sleep_enabled: bool,
    /// MODE[14] QUICK_START.
    pub quick_start: bool,
}

impl ModeSnapshot {
    /// Builds a snapshot from the raw MODE bitfield.
    pub fn from_register(mode: Mode) -> Self {
        Self {
            hibernating: mode.hi_stat(),
            sleep_enabled: mode.en_sleep(),
            quick_start: mode.quick_start(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModeSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ModeSnapshot {{\n    HI_STAT: {},\n    EN_SLEEP: {},\n    QUICK_START: {}\n}}",
            self.hibernating,
            self.sleep_enabled,
            self.quick_start
        );
    }
}

impl<IFACE> Max17048<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// Stores the interface only; no bus traffic is generated.
    pub fn new(interface: IFACE) -> Self {
        Self { interface }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }
}

impl<I2C> Max17048<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I²C transports using the default address.
    pub fn new_i2c(i2c: I2C) -> Self {
        Self::new(I2cInterface::new(i2c))
    }

    /// Convenience constructor for a non-default 7-bit bus address.
    pub fn new_i2c_with_address(i2c: I2C, address: u8) -> Self {
        Self::new(I2cInterface::with_address(i2c, address))
    }

    /// Releases the driver, returning the I²C device.
    pub fn release_i2c(self) -> I2C {
        self.release().release()
    }
}

impl<IFACE, CommE> Max17048<IFACE>
where
    IFACE: Max17048Interface<Error = CommE>,
{
    // ==================================================================
    // == Measurements & Identification =================================
    // ==================================================================
    /// Reads the IC production version register.
    pub fn version(&mut self) -> Result<u16, CommE> {
        self
            .interface
            .read_register(REG_VERSION)
            .map_err(Error::from)
    }

    /// Reads the cell voltage in millivolts.
    pub fn voltage_mv(&mut self) -> Result<u16, CommE> {
        let raw = self
            .interface
            .read_register(REG_VCELL)
            .map_err(Error::from)?;
        Ok(Self::vcell_to_millivolts(raw))
    }

    /// Reads the state of charge as a fractional percentage.
    ///
    /// The high byte carries whole percent, the low byte 1/256 percent
    /// steps. Per the datasheet the first valid reading is available
    /// roughly one second after power-on reset; the driver does not
    /// enforce that delay.
    pub fn state_of_charge(&mut self) -> Result<f32, CommE> {
        let raw = self
            .interface
            .read_register(REG_SOC)
            .map_err(Error::from)?;
        Ok((raw >> 8) as f32 + (raw & 0x00FF) as f32 / 256.0)
    }

    /// Reads the state of charge truncated to whole percent.
    pub fn state_of_charge_integer(&mut self) -> Result<u8, CommE> {
        let raw = self
            .interface
            .read_register(REG_SOC)
            .map_err(Error::from)?;
        Ok((raw >> 8) as u8)
    }

    /// Returns a decoded snapshot of the `MODE` register.
    pub fn read_mode(&mut self) -> Result<ModeSnapshot, CommE> {
        let raw = self
            .interface
            .read_register(REG_MODE)
            .map_err(Error::from)?;
        Ok(ModeSnapshot::from_register(Mode::from(raw)))
    }

    /// Returns whether the IC currently reports hibernate mode.
    pub fn is_hibernating(&mut self) -> Result<bool, CommE> {
        Ok(self.read_mode()?.hibernating)
    }

    // ==================================================================
    // == Commands & Configuration ======================================
    // ==================================================================
    /// Issues the power-on-reset command.
    ///
    /// The device performs a soft reset; no verification read follows.
    pub fn reset(&mut self) -> Result<(), CommE> {
        self
            .interface
            .write_register(REG_CMD, RESET_COMMAND)
            .map_err(Error::from)
    }

    /// Replaces the compensation value in the `CONFIG` high byte.
    ///
    /// The low byte (sleep and alert fields) is preserved unchanged.
    pub fn set_compensation(&mut self, rcomp: u8) -> Result<(), CommE> {
        self.update_config(|config| config.set_rcomp(rcomp))
    }

    /// Permits the IC to enter sleep via `MODE.EN_SLEEP`.
    ///
    /// This only grants permission; sleep itself is requested through
    /// [`set_sleep`](Self::set_sleep).
    pub fn enable_sleep(&mut self) -> Result<(), CommE> {
        self.update_mode(|mode| mode.set_en_sleep(true))
    }

    /// Forces the IC to restart its state-of-charge estimation.
    ///
    /// Discards the learned battery model; intended for hot-swapped cells.
    pub fn quick_start(&mut self) -> Result<(), CommE> {
        self.update_mode(|mode| mode.set_quick_start(true))
    }

    /// Requests or clears sleep mode via `CONFIG.SLEEP`.
    pub fn set_sleep(&mut self, enabled: bool) -> Result<(), CommE> {
        self.update_config(|config| config.set_sleep(enabled))
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================

    #[inline]
    fn vcell_to_millivolts(raw: u16) -> u16 {
        // 78.125 µV/LSB; the product exceeds 32 bits at full scale.
        ((raw as u64 * VCELL_RESOLUTION_NV) / 1_000_000) as u16
    }

    fn update_mode<F>(&mut self, mutate: F) -> Result<(), CommE>
    where
        F: FnOnce(&mut Mode),
    {
        let current = self
            .interface
            .read_register(REG_MODE)
            .map_err(Error::from)?;

        let mut mode = Mode::from(current);
        mutate(&mut mode);

        self
            .interface
            .write_register(REG_MODE, u16::from(mode))
            .map_err(Error::from)
    }

    fn update_config<F>(&mut self, mutate: F) -> Result<(), CommE>
    where
        F: FnOnce(&mut Config),
    {
        let current = self
            .interface
            .read_register(REG_CONFIG)
            .map_err(Error::from)?;

        let mut config = Config::from(current);
        mutate(&mut config);

        self
            .interface
            .write_register(REG_CONFIG, u16::from(config))
            .map_err(Error::from)
    }
}
